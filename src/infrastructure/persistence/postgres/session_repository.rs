use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::auth::{AuthError, NewSession, Session, SessionRepository};
use crate::domain::errors::RepositoryError;

/// PostgreSQL implementation of the SessionRepository trait
pub struct PostgresSessionRepository {
  pool: PgPool,
}

impl PostgresSessionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
  id: i64,
  user_id: i64,
  token_hash: String,
  expires_at: DateTime<Utc>,
  created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
  fn from(row: SessionRow) -> Self {
    Session {
      id: row.id,
      user_id: row.user_id,
      token_hash: row.token_hash,
      expires_at: row.expires_at,
      created_at: row.created_at,
    }
  }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
  async fn create(&self, session: NewSession) -> Result<Session, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, expires_at, created_at
            "#,
    )
    .bind(session.user_id)
    .bind(&session.token_hash)
    .bind(session.expires_at)
    .fetch_one(&self.pool)
    .await
    .map_err(RepositoryError::from)?;

    Ok(row.into())
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT id, user_id, token_hash, expires_at, created_at
            FROM sessions
            WHERE token_hash = $1
            "#,
    )
    .bind(token_hash)
    .fetch_optional(&self.pool)
    .await
    .map_err(RepositoryError::from)?;

    Ok(row.map(Into::into))
  }

  async fn delete(&self, session_id: i64) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
      .bind(session_id)
      .execute(&self.pool)
      .await
      .map_err(RepositoryError::from)?;

    Ok(())
  }

  async fn delete_expired(&self) -> Result<u64, AuthError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
      .execute(&self.pool)
      .await
      .map_err(RepositoryError::from)?;

    Ok(result.rows_affected())
  }
}
