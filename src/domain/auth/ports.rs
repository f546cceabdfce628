use async_trait::async_trait;

use super::entities::{NewSession, NewUser, Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts a user. A taken email surfaces as `RepositoryError::DuplicateKey`.
  async fn create(&self, user: NewUser) -> Result<User, AuthError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: NewSession) -> Result<Session, AuthError>;

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  async fn delete(&self, session_id: i64) -> Result<(), AuthError>;

  /// Removes sessions whose expiry has passed; returns how many were removed.
  async fn delete_expired(&self) -> Result<u64, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError>;
}

/// Source of fresh, unguessable session tokens
pub trait TokenGenerator: Send + Sync {
  fn generate(&self) -> SessionToken;
}
