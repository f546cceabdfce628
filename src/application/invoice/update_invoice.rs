use std::sync::Arc;

use super::invoice_dto::{InvoiceResponse, SaveInvoiceCommand};
use crate::domain::invoice::{InvoiceError, InvoiceService};

/// Replaces the contents of an existing invoice, keeping its number
pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    invoice_id: i64,
    command: SaveInvoiceCommand,
  ) -> Result<InvoiceResponse, InvoiceError> {
    let (user_id, input) = command.into_input();
    let updated = self
      .invoice_service
      .update_invoice(user_id, invoice_id, input)
      .await?;
    Ok(updated.into())
  }
}
