use thiserror::Error;

use super::value_objects::ValueObjectError;
use crate::domain::business::{BusinessError, ValidationError};
use crate::domain::errors::{ErrorKind, RepositoryError};

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("{0}")]
  Validation(#[from] ValueObjectError),

  #[error("{0}")]
  Party(#[from] ValidationError),

  #[error("Invoice must have at least one line item")]
  NoLineItems,

  #[error("Invoice cannot have more than {max} line items")]
  TooManyLineItems { max: usize },

  #[error("Invoice not found")]
  NotFound,

  #[error("Invoice belongs to another user")]
  Forbidden,

  #[error("No active business selected")]
  NoActiveBusiness,

  #[error("Invoice number {0} is already taken")]
  NumberConflict(String),

  #[error(transparent)]
  Business(BusinessError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<BusinessError> for InvoiceError {
  fn from(err: BusinessError) -> Self {
    match err {
      BusinessError::NoActiveBusiness => InvoiceError::NoActiveBusiness,
      BusinessError::Repository(e) => InvoiceError::Repository(e),
      other => InvoiceError::Business(other),
    }
  }
}

impl InvoiceError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      InvoiceError::Validation(_)
      | InvoiceError::Party(_)
      | InvoiceError::NoLineItems
      | InvoiceError::TooManyLineItems { .. } => ErrorKind::Validation,
      InvoiceError::NotFound => ErrorKind::NotFound,
      InvoiceError::Forbidden => ErrorKind::Forbidden,
      InvoiceError::NoActiveBusiness => ErrorKind::NoActiveBusiness,
      InvoiceError::NumberConflict(_) => ErrorKind::Conflict,
      InvoiceError::Business(e) => e.kind(),
      InvoiceError::Repository(_) => ErrorKind::Internal,
    }
  }
}
