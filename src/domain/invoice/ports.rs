use async_trait::async_trait;

use super::entities::{Invoice, InvoiceFilter, InvoiceItem, InvoiceWithItems, PricedInvoice};
use super::errors::InvoiceError;
use super::numbering::{DateRange, InvoicePeriod};
use super::value_objects::Money;

/// Persistence for invoices and their line items.
///
/// Header and items are always written together: either all rows of an
/// invoice are stored or none are.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Allocates the next number of the issue month and stores the invoice
  /// with its items in one unit of work. Concurrent calls for the same
  /// business and month never receive the same number.
  async fn create(
    &self,
    business_id: i64,
    invoice: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError>;

  /// Replaces header fields and the full item set. The number is kept.
  async fn update(
    &self,
    invoice_id: i64,
    invoice: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError>;

  /// Deletes the invoice and its items.
  async fn delete(&self, invoice_id: i64) -> Result<(), InvoiceError>;

  async fn find_by_id(&self, invoice_id: i64) -> Result<Option<Invoice>, InvoiceError>;

  async fn find_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>, InvoiceError>;

  /// Ordered by issue date then creation time, newest first.
  async fn list(
    &self,
    business_id: i64,
    filter: &InvoiceFilter,
  ) -> Result<Vec<Invoice>, InvoiceError>;

  /// The `limit` most recently created invoices.
  async fn recent(&self, business_id: i64, limit: i64) -> Result<Vec<Invoice>, InvoiceError>;

  /// Exact sum of `total_amount` over invoices issued within `range`.
  async fn sum_totals(&self, business_id: i64, range: DateRange) -> Result<Money, InvoiceError>;

  /// The sequence `create` would hand out next, without reserving it.
  async fn peek_next_sequence(
    &self,
    business_id: i64,
    period: InvoicePeriod,
  ) -> Result<u32, InvoiceError>;
}
