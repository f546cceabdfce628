use std::sync::Arc;

use super::invoice_dto::InvoiceResponse;
use crate::domain::invoice::{InvoiceError, InvoiceService};

/// Printable invoice: items plus the issuing business's seller block
pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, user_id: i64, invoice_id: i64) -> Result<InvoiceResponse, InvoiceError> {
    let details = self.invoice_service.get_invoice(user_id, invoice_id).await?;
    Ok(details.into())
  }
}
