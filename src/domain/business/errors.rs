use thiserror::Error;

use crate::domain::errors::{ErrorKind, RepositoryError};

#[derive(Debug, Error)]
pub enum BusinessError {
  #[error("Business not found")]
  NotFound,

  #[error("Business has {0} invoice(s) and cannot be deleted")]
  HasInvoices(i64),

  #[error("No active business selected")]
  NoActiveBusiness,

  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl BusinessError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      BusinessError::NotFound => ErrorKind::NotFound,
      BusinessError::HasInvoices(_) => ErrorKind::Conflict,
      BusinessError::NoActiveBusiness => ErrorKind::NoActiveBusiness,
      BusinessError::Validation(_) => ErrorKind::Validation,
      BusinessError::Repository(_) => ErrorKind::Internal,
    }
  }
}

/// Field-level validation failures for business and party data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{field} is required")]
  Required { field: &'static str },

  #[error("{field} must be at most {max} characters")]
  TooLong { field: &'static str, max: usize },

  #[error("{field} contains invalid characters")]
  InvalidCharacters { field: &'static str },

  #[error("{field} must not be negative")]
  NegativeAmount { field: &'static str },
}
