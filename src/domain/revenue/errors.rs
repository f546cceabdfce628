use thiserror::Error;

use crate::domain::business::BusinessError;
use crate::domain::errors::ErrorKind;
use crate::domain::invoice::{InvoiceError, ValueObjectError};

#[derive(Debug, Error)]
pub enum RevenueError {
  #[error("{0}")]
  InvalidPeriod(#[from] ValueObjectError),

  #[error(transparent)]
  Invoice(#[from] InvoiceError),

  #[error(transparent)]
  Business(#[from] BusinessError),
}

impl RevenueError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      RevenueError::InvalidPeriod(_) => ErrorKind::Validation,
      RevenueError::Invoice(e) => e.kind(),
      RevenueError::Business(e) => e.kind(),
    }
  }
}
