use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::invoice::{
  Invoice, InvoiceDetails, InvoiceInput, InvoiceItem, InvoiceWithItems, LineItemInput, Money,
};

#[derive(Debug, Clone)]
pub struct LineItemCommand {
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
}

/// Invoice fields accepted on create and update
#[derive(Debug, Clone)]
pub struct SaveInvoiceCommand {
  pub user_id: i64,
  pub issue_date: NaiveDate,
  pub buyer_name: String,
  pub buyer_address: String,
  pub buyer_tax_id: Option<String>,
  pub notes: Option<String>,
  pub items: Vec<LineItemCommand>,
}

impl SaveInvoiceCommand {
  pub(super) fn into_input(self) -> (i64, InvoiceInput) {
    (
      self.user_id,
      InvoiceInput {
        issue_date: self.issue_date,
        buyer_name: self.buyer_name,
        buyer_address: self.buyer_address,
        buyer_tax_id: self.buyer_tax_id,
        notes: self.notes,
        items: self
          .items
          .into_iter()
          .map(|i| LineItemInput {
            name: i.name,
            quantity: i.quantity,
            unit_price: i.unit_price,
            tax_rate: i.tax_rate,
          })
          .collect(),
      },
    )
  }
}

/// Row in invoice listings and on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummaryDto {
  pub id: i64,
  pub invoice_number: String,
  pub issue_date: NaiveDate,
  pub buyer_name: String,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceSummaryDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      invoice_number: invoice.invoice_number,
      issue_date: invoice.issue_date,
      buyer_name: invoice.buyer.name,
      total_amount: Money::new(invoice.total_amount).rounded(),
      created_at: invoice.created_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceItemDto {
  pub id: i64,
  pub name: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
  pub tax_rate: Decimal,
  pub total_price: Decimal,
}

/// Unit prices keep every stored digit so a fetched item can be sent back
/// unchanged; at least two places are shown.
fn exact_price(price: Decimal) -> Decimal {
  let mut price = price.normalize();
  if price.scale() < 2 {
    price.rescale(2);
  }
  price
}

impl From<InvoiceItem> for InvoiceItemDto {
  fn from(item: InvoiceItem) -> Self {
    Self {
      id: item.id,
      name: item.name,
      quantity: item.quantity.normalize(),
      unit_price: exact_price(item.unit_price),
      tax_rate: item.tax_rate.normalize(),
      total_price: Money::new(item.total_price).rounded(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct PartyDto {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
}

/// Full invoice: header, buyer, items and, for reads, the seller block
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
  pub id: i64,
  pub business_id: i64,
  pub invoice_number: String,
  pub issue_date: NaiveDate,
  pub buyer: PartyDto,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub seller: Option<SellerDto>,
  pub notes: Option<String>,
  pub total_amount: Decimal,
  pub items: Vec<InvoiceItemDto>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerDto {
  pub business_name: String,
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_account: Option<String>,
}

impl InvoiceResponse {
  fn build(invoice: Invoice, items: Vec<InvoiceItem>, seller: Option<SellerDto>) -> Self {
    Self {
      id: invoice.id,
      business_id: invoice.business_id,
      invoice_number: invoice.invoice_number,
      issue_date: invoice.issue_date,
      buyer: PartyDto {
        name: invoice.buyer.name,
        address: invoice.buyer.address,
        tax_id: invoice.buyer.tax_id,
      },
      seller,
      notes: invoice.notes,
      total_amount: Money::new(invoice.total_amount).rounded(),
      items: items.into_iter().map(Into::into).collect(),
      created_at: invoice.created_at,
    }
  }
}

impl From<InvoiceWithItems> for InvoiceResponse {
  fn from(value: InvoiceWithItems) -> Self {
    Self::build(value.invoice, value.items, None)
  }
}

impl From<InvoiceDetails> for InvoiceResponse {
  fn from(value: InvoiceDetails) -> Self {
    let seller = SellerDto {
      business_name: value.business_name,
      name: value.seller.name,
      address: value.seller.address,
      tax_id: value.seller.tax_id,
      bank_account: value.seller.bank_account,
    };
    Self::build(value.invoice, value.items, Some(seller))
  }
}
