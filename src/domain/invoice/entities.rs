use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::{invoice_total, line_total};
use super::errors::InvoiceError;
use super::numbering::{DateRange, InvoicePeriod};
use super::value_objects::{InvoiceNotes, ItemName, Money, Quantity, TaxRate, UnitPrice};
use crate::domain::business::{PartyAddress, PartyName, SellerIdentity, TaxId};

/// Upper bound on line items per invoice.
pub const MAX_LINE_ITEMS: usize = 500;

/// Buyer block of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerIdentity {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
}

/// Persisted invoice header. `total_amount` is the exact sum of item totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
  pub id: i64,
  pub business_id: i64,
  pub invoice_number: String,
  pub issue_date: NaiveDate,
  pub buyer: BuyerIdentity,
  pub notes: Option<String>,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
  pub id: i64,
  pub invoice_id: i64,
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
  pub total_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct InvoiceWithItems {
  pub invoice: Invoice,
  pub items: Vec<InvoiceItem>,
}

/// Everything needed to render a printable invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDetails {
  pub invoice: Invoice,
  pub items: Vec<InvoiceItem>,
  pub seller: SellerIdentity,
  pub business_name: String,
}

/// Unvalidated line item as submitted by a client.
#[derive(Debug, Clone)]
pub struct LineItemInput {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
}

/// Unvalidated invoice as submitted by a client.
#[derive(Debug, Clone)]
pub struct InvoiceInput {
  pub issue_date: NaiveDate,
  pub buyer_name: String,
  pub buyer_address: String,
  pub buyer_tax_id: Option<String>,
  pub notes: Option<String>,
  pub items: Vec<LineItemInput>,
}

/// A validated line item with its computed gross total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
  pub total: Money,
}

/// A validated invoice with all totals computed, ready to persist.
#[derive(Debug, Clone)]
pub struct PricedInvoice {
  pub issue_date: NaiveDate,
  pub period: InvoicePeriod,
  pub buyer: BuyerIdentity,
  pub notes: Option<String>,
  pub items: Vec<PricedItem>,
  pub total: Money,
}

impl PricedInvoice {
  pub fn new(input: InvoiceInput) -> Result<Self, InvoiceError> {
    if input.items.is_empty() {
      return Err(InvoiceError::NoLineItems);
    }
    if input.items.len() > MAX_LINE_ITEMS {
      return Err(InvoiceError::TooManyLineItems {
        max: MAX_LINE_ITEMS,
      });
    }

    let period = InvoicePeriod::of(input.issue_date)?;
    let buyer = BuyerIdentity {
      name: PartyName::new(&input.buyer_name, "buyer_name")?
        .as_str()
        .to_string(),
      address: PartyAddress::new(&input.buyer_address, "buyer_address")?
        .as_str()
        .to_string(),
      tax_id: TaxId::parse_optional(input.buyer_tax_id.as_deref(), "buyer_tax_id")?
        .map(|t| t.as_str().to_string()),
    };
    let notes = InvoiceNotes::parse_optional(input.notes.as_deref())?.map(InvoiceNotes::into_inner);

    let items = input
      .items
      .into_iter()
      .map(PricedItem::new)
      .collect::<Result<Vec<_>, _>>()?;
    let total = invoice_total(items.iter().map(|i| i.total));

    Ok(Self {
      issue_date: input.issue_date,
      period,
      buyer,
      notes,
      items,
      total,
    })
  }
}

impl PricedItem {
  fn new(input: LineItemInput) -> Result<Self, InvoiceError> {
    let name = ItemName::new(&input.name)?;
    let quantity = Quantity::new(input.quantity)?;
    let unit_price = UnitPrice::new(input.unit_price)?;
    let tax_rate = TaxRate::new(input.tax_rate)?;

    Ok(Self {
      name: name.into_inner(),
      quantity: quantity.value(),
      unit_price: unit_price.value(),
      tax_rate: tax_rate.value(),
      total: line_total(quantity, unit_price, tax_rate),
    })
  }
}

/// Issue-date restriction for invoice listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
  Month(InvoicePeriod),
  Year(i32),
}

impl PeriodFilter {
  pub fn range(&self) -> Result<DateRange, InvoiceError> {
    let range = match self {
      PeriodFilter::Month(period) => period.range()?,
      PeriodFilter::Year(year) => DateRange::year(*year)?,
    };
    Ok(range)
  }
}

/// Listing criteria. Search matches invoice number or buyer name,
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
  pub search: Option<String>,
  pub period: Option<PeriodFilter>,
}

impl InvoiceFilter {
  /// A month is only applied together with a year.
  pub fn new(
    search: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
  ) -> Result<Self, InvoiceError> {
    let search = search
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty());
    let period = match (year, month) {
      (Some(year), Some(month)) => Some(PeriodFilter::Month(InvoicePeriod::new(year, month)?)),
      (Some(year), None) => {
        DateRange::year(year)?;
        Some(PeriodFilter::Year(year))
      }
      (None, _) => None,
    };
    Ok(Self { search, period })
  }

  pub fn matches(&self, invoice: &Invoice) -> bool {
    let search_ok = self.search.as_ref().is_none_or(|needle| {
      let needle = needle.to_lowercase();
      invoice.invoice_number.to_lowercase().contains(&needle)
        || invoice.buyer.name.to_lowercase().contains(&needle)
    });
    let period_ok = self.period.is_none_or(|p| {
      p.range()
        .map(|r| r.contains(invoice.issue_date))
        .unwrap_or(false)
    });
    search_ok && period_ok
  }
}
