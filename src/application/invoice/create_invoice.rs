use std::sync::Arc;

use super::invoice_dto::{InvoiceResponse, SaveInvoiceCommand};
use crate::domain::invoice::{InvoiceError, InvoiceService};

/// Issues a new invoice under the caller's active business
pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: SaveInvoiceCommand) -> Result<InvoiceResponse, InvoiceError> {
    let (user_id, input) = command.into_input();
    let created = self.invoice_service.create_invoice(user_id, input).await?;
    Ok(created.into())
  }
}
