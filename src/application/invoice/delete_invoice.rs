use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, user_id: i64, invoice_id: i64) -> Result<(), InvoiceError> {
    self.invoice_service.delete_invoice(user_id, invoice_id).await
  }
}
