use thiserror::Error;

use super::value_objects::ValueObjectError;
use crate::domain::errors::{ErrorKind, RepositoryError};

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid or expired session")]
  InvalidSession,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("{0}")]
  ValueObject(#[from] ValueObjectError),
}

impl AuthError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      AuthError::InvalidCredentials | AuthError::InvalidSession => ErrorKind::Unauthorized,
      AuthError::EmailAlreadyExists => ErrorKind::Conflict,
      AuthError::UserNotFound => ErrorKind::NotFound,
      AuthError::ValueObject(_) => ErrorKind::Validation,
      AuthError::Repository(_) | AuthError::Hash(_) => ErrorKind::Internal,
    }
  }
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}
