use serde::Serialize;
use thiserror::Error;

/// Stable classification every domain error maps onto.
///
/// The HTTP adapter turns a kind into a status code and the `error` field of
/// the response body, so the string forms below are part of the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
  #[serde(rename = "validation_error")]
  Validation,
  #[serde(rename = "not_found")]
  NotFound,
  #[serde(rename = "forbidden")]
  Forbidden,
  #[serde(rename = "no_active_business")]
  NoActiveBusiness,
  #[serde(rename = "conflict")]
  Conflict,
  #[serde(rename = "unauthorized")]
  Unauthorized,
  #[serde(rename = "internal_error")]
  Internal,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorKind::Validation => "validation_error",
      ErrorKind::NotFound => "not_found",
      ErrorKind::Forbidden => "forbidden",
      ErrorKind::NoActiveBusiness => "no_active_business",
      ErrorKind::Conflict => "conflict",
      ErrorKind::Unauthorized => "unauthorized",
      ErrorKind::Internal => "internal_error",
    }
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Transaction failed: {0}")]
  TransactionFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Foreign key violation: {0}")]
  ForeignKey(String),

  #[error("Stored data is invalid: {0}")]
  CorruptData(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(err: sqlx::Error) -> Self {
    match err {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
        RepositoryError::ConnectionFailed(err.to_string())
      }
      sqlx::Error::Database(ref db_err) => {
        let message = db_err.message().to_string();
        match db_err.code().as_deref() {
          // unique_violation
          Some("23505") => RepositoryError::DuplicateKey(
            db_err.constraint().map(str::to_string).unwrap_or(message),
          ),
          // foreign_key_violation
          Some("23503") => RepositoryError::ForeignKey(
            db_err.constraint().map(str::to_string).unwrap_or(message),
          ),
          _ => RepositoryError::QueryFailed(message),
        }
      }
      other => RepositoryError::QueryFailed(other.to_string()),
    }
  }
}
