use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use super::entities::{
  Invoice, InvoiceDetails, InvoiceFilter, InvoiceInput, InvoiceWithItems, PricedInvoice,
};
use super::errors::InvoiceError;
use super::numbering::{InvoiceNumber, InvoicePeriod};
use super::ports::InvoiceRepository;
use crate::domain::business::{Business, BusinessRepository};

/// Invoice lifecycle for the user's active business.
pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  business_repo: Arc<dyn BusinessRepository>,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    business_repo: Arc<dyn BusinessRepository>,
  ) -> Self {
    Self {
      invoice_repo,
      business_repo,
    }
  }

  /// Prices and stores a new invoice under the active business, assigning
  /// the next number of its issue month.
  pub async fn create_invoice(
    &self,
    user_id: i64,
    input: InvoiceInput,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let business = self.active_business(user_id).await?;
    let priced = PricedInvoice::new(input)?;

    let created = self.invoice_repo.create(business.id, &priced).await?;
    info!(
      user_id,
      business_id = business.id,
      invoice_id = created.invoice.id,
      invoice_number = %created.invoice.invoice_number,
      "invoice created"
    );
    Ok(created)
  }

  /// Replaces header and items of an invoice the user owns.
  pub async fn update_invoice(
    &self,
    user_id: i64,
    invoice_id: i64,
    input: InvoiceInput,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let (invoice, business) = self.owned_invoice(user_id, invoice_id).await?;
    let priced = PricedInvoice::new(input)?;

    if InvoicePeriod::of(invoice.issue_date)? != priced.period {
      warn!(
        invoice_id,
        invoice_number = %invoice.invoice_number,
        "issue date moved to another month; number is kept"
      );
    }

    let updated = self.invoice_repo.update(invoice_id, &priced).await?;
    info!(
      user_id,
      business_id = business.id,
      invoice_id,
      invoice_number = %updated.invoice.invoice_number,
      "invoice updated"
    );
    Ok(updated)
  }

  pub async fn delete_invoice(&self, user_id: i64, invoice_id: i64) -> Result<(), InvoiceError> {
    self.owned_invoice(user_id, invoice_id).await?;
    self.invoice_repo.delete(invoice_id).await?;
    info!(user_id, invoice_id, "invoice deleted");
    Ok(())
  }

  /// Invoice with items and the seller identity of its business.
  pub async fn get_invoice(
    &self,
    user_id: i64,
    invoice_id: i64,
  ) -> Result<InvoiceDetails, InvoiceError> {
    let (invoice, business) = self.owned_invoice(user_id, invoice_id).await?;
    let items = self.invoice_repo.find_items(invoice_id).await?;

    Ok(InvoiceDetails {
      invoice,
      items,
      seller: business.seller,
      business_name: business.name,
    })
  }

  /// Invoices of the active business; empty when none is active.
  pub async fn list_invoices(
    &self,
    user_id: i64,
    filter: &InvoiceFilter,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    match self.business_repo.find_active(user_id).await? {
      Some(business) => self.invoice_repo.list(business.id, filter).await,
      None => Ok(Vec::new()),
    }
  }

  /// The number the next invoice issued on `issue_date` would receive.
  /// Nothing is reserved; a concurrent create may take it first.
  pub async fn preview_next_number(
    &self,
    user_id: i64,
    issue_date: NaiveDate,
  ) -> Result<InvoiceNumber, InvoiceError> {
    let business = self.active_business(user_id).await?;
    let period = InvoicePeriod::of(issue_date)?;
    let sequence = self
      .invoice_repo
      .peek_next_sequence(business.id, period)
      .await?;
    Ok(InvoiceNumber::compose(period, sequence))
  }

  async fn active_business(&self, user_id: i64) -> Result<Business, InvoiceError> {
    self
      .business_repo
      .find_active(user_id)
      .await?
      .ok_or(InvoiceError::NoActiveBusiness)
  }

  async fn owned_invoice(
    &self,
    user_id: i64,
    invoice_id: i64,
  ) -> Result<(Invoice, Business), InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::NotFound)?;

    let business = self
      .business_repo
      .find_by_id(invoice.business_id)
      .await?
      .ok_or(InvoiceError::NotFound)?;

    if !business.is_owned_by(user_id) {
      return Err(InvoiceError::Forbidden);
    }

    Ok((invoice, business))
  }
}
