use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::auth::{AuthError, Email, NewUser, User, UserRepository};
use crate::domain::errors::RepositoryError;

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: i64,
  email: String,
  password_hash: String,
  name: String,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      email: row.email,
      password_hash: row.password_hash,
      name: row.name,
      created_at: row.created_at,
    }
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: NewUser) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at
            "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| match RepositoryError::from(e) {
      // users_email_key; a concurrent registration won the race
      RepositoryError::DuplicateKey(_) => AuthError::EmailAlreadyExists,
      other => AuthError::Repository(other),
    })?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(RepositoryError::from)?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await
    .map_err(RepositoryError::from)?;

    Ok(row.map(Into::into))
  }
}
