use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::business::SaveBusinessCommand;
use crate::application::invoice::{LineItemCommand, SaveInvoiceCommand};

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// Upper bound only; the minimum comes from configuration
  #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
  pub password: String,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  pub name: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Body for creating or replacing a business
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BusinessRequest {
  #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
  pub name: String,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Seller name must be between 1 and 255 characters"
  ))]
  pub seller_name: String,

  #[validate(length(
    min = 1,
    max = 1000,
    message = "Seller address must be between 1 and 1000 characters"
  ))]
  pub seller_address: String,

  #[serde(default)]
  #[validate(length(max = 32, message = "Tax id must be at most 32 characters"))]
  pub seller_tax_id: Option<String>,

  #[serde(default)]
  #[validate(length(max = 64, message = "Bank account must be at most 64 characters"))]
  pub seller_bank_account: Option<String>,

  /// Falls back to the configured default when omitted
  #[serde(default)]
  pub monthly_limit: Option<Decimal>,

  #[serde(default)]
  pub yearly_limit: Option<Decimal>,
}

impl BusinessRequest {
  pub fn into_command(self, user_id: i64) -> SaveBusinessCommand {
    SaveBusinessCommand {
      user_id,
      name: self.name,
      seller_name: self.seller_name,
      seller_address: self.seller_address,
      seller_tax_id: self.seller_tax_id,
      seller_bank_account: self.seller_bank_account,
      monthly_limit: self.monthly_limit,
      yearly_limit: self.yearly_limit,
    }
  }
}

/// One invoice line as submitted by the client
///
/// Numeric bounds (non-negative, scale, tax rate range) are enforced by the
/// domain value objects; only presence and length are checked here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemRequest {
  #[validate(length(
    min = 1,
    max = 500,
    message = "Item name must be between 1 and 500 characters"
  ))]
  pub name: String,

  pub quantity: Decimal,

  pub unit_price: Decimal,

  pub tax_rate: Decimal,
}

/// Body for creating or replacing an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  pub issue_date: NaiveDate,

  #[validate(length(
    min = 1,
    max = 255,
    message = "Buyer name must be between 1 and 255 characters"
  ))]
  pub buyer_name: String,

  #[validate(length(
    min = 1,
    max = 1000,
    message = "Buyer address must be between 1 and 1000 characters"
  ))]
  pub buyer_address: String,

  #[serde(default)]
  #[validate(length(max = 32, message = "Buyer tax id must be at most 32 characters"))]
  pub buyer_tax_id: Option<String>,

  #[serde(default)]
  #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
  pub notes: Option<String>,

  #[validate(length(min = 1, message = "At least one line item is required"), nested)]
  pub items: Vec<LineItemRequest>,
}

impl InvoiceRequest {
  pub fn into_command(self, user_id: i64) -> SaveInvoiceCommand {
    SaveInvoiceCommand {
      user_id,
      issue_date: self.issue_date,
      buyer_name: self.buyer_name,
      buyer_address: self.buyer_address,
      buyer_tax_id: self.buyer_tax_id,
      notes: self.notes,
      items: self
        .items
        .into_iter()
        .map(|item| LineItemCommand {
          name: item.name,
          quantity: item.quantity,
          unit_price: item.unit_price,
          tax_rate: item.tax_rate,
        })
        .collect(),
    }
  }
}

/// `GET /invoices` query string
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoiceListQuery {
  #[validate(length(max = 255, message = "Search must be at most 255 characters"))]
  pub search: Option<String>,

  #[validate(range(min = 1, max = 9999, message = "Year must be between 1 and 9999"))]
  pub year: Option<i32>,

  #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
  pub month: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextNumberQuery {
  /// Defaults to today (UTC)
  pub issue_date: Option<NaiveDate>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Machine-readable error kind
  pub error: String,

  /// Human-readable error message
  pub message: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
