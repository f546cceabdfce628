use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Clone, Serialize)]
pub struct PreviewInvoiceNumberResponse {
  pub invoice_number: String,
  pub issue_date: NaiveDate,
}

/// Shows the number a new invoice would get. Nothing is reserved.
pub struct PreviewInvoiceNumberUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl PreviewInvoiceNumberUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    user_id: i64,
    issue_date: NaiveDate,
  ) -> Result<PreviewInvoiceNumberResponse, InvoiceError> {
    let number = self
      .invoice_service
      .preview_next_number(user_id, issue_date)
      .await?;

    Ok(PreviewInvoiceNumberResponse {
      invoice_number: number.into_inner(),
      issue_date,
    })
  }
}
