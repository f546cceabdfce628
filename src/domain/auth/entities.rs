use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. Businesses and invoices hang off a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  /// Lower-cased, unique
  pub email: String,
  /// Argon2id PHC string
  pub password_hash: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

/// Data required to insert a user; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
  pub name: String,
}

/// Server-side session. Only the SHA-256 of the bearer token is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: i64,
  pub user_id: i64,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }

  pub fn is_expired(&self) -> bool {
    self.is_expired_at(Utc::now())
  }
}

#[derive(Debug, Clone)]
pub struct NewSession {
  pub user_id: i64,
  pub token_hash: String,
  pub expires_at: DateTime<Utc>,
}

impl NewSession {
  pub fn with_ttl(user_id: i64, token_hash: String, ttl: Duration) -> Self {
    Self {
      user_id,
      token_hash,
      expires_at: Utc::now() + ttl,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_session_expiry() {
    let now = Utc::now();
    let session = Session {
      id: 1,
      user_id: 1,
      token_hash: "h".to_string(),
      expires_at: now,
      created_at: now - Duration::hours(1),
    };

    assert!(session.is_expired_at(now));
    assert!(!session.is_expired_at(now - Duration::seconds(1)));
  }

  #[test]
  fn test_new_session_ttl() {
    let session = NewSession::with_ttl(3, "h".into(), Duration::hours(2));
    assert!(session.expires_at > Utc::now() + Duration::minutes(119));
  }
}
