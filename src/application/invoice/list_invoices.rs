use std::sync::Arc;

use super::invoice_dto::InvoiceSummaryDto;
use crate::domain::invoice::{InvoiceError, InvoiceFilter, InvoiceService};

#[derive(Debug, Clone, Default)]
pub struct ListInvoicesCommand {
  pub user_id: i64,
  pub search: Option<String>,
  pub year: Option<i32>,
  /// Ignored unless `year` is set
  pub month: Option<u32>,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<Vec<InvoiceSummaryDto>, InvoiceError> {
    let filter = InvoiceFilter::new(command.search, command.year, command.month)?;
    let invoices = self
      .invoice_service
      .list_invoices(command.user_id, &filter)
      .await?;

    Ok(invoices.into_iter().map(Into::into).collect())
  }
}
