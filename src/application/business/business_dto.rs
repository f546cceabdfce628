use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::business::{Business, BusinessInput};
use crate::domain::invoice::Money;

/// Fields accepted when creating or updating a business
#[derive(Debug, Clone)]
pub struct SaveBusinessCommand {
  pub user_id: i64,
  pub name: String,
  pub seller_name: String,
  pub seller_address: String,
  pub seller_tax_id: Option<String>,
  pub seller_bank_account: Option<String>,
  pub monthly_limit: Option<Decimal>,
  pub yearly_limit: Option<Decimal>,
}

impl SaveBusinessCommand {
  pub(super) fn into_input(self) -> (i64, BusinessInput) {
    (
      self.user_id,
      BusinessInput {
        name: self.name,
        seller_name: self.seller_name,
        seller_address: self.seller_address,
        seller_tax_id: self.seller_tax_id,
        seller_bank_account: self.seller_bank_account,
        monthly_limit: self.monthly_limit,
        yearly_limit: self.yearly_limit,
      },
    )
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessResponse {
  pub id: i64,
  pub name: String,
  pub seller_name: String,
  pub seller_address: String,
  pub seller_tax_id: Option<String>,
  pub seller_bank_account: Option<String>,
  pub monthly_limit: Decimal,
  pub yearly_limit: Decimal,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

impl From<Business> for BusinessResponse {
  fn from(business: Business) -> Self {
    Self {
      id: business.id,
      name: business.name,
      seller_name: business.seller.name,
      seller_address: business.seller.address,
      seller_tax_id: business.seller.tax_id,
      seller_bank_account: business.seller.bank_account,
      monthly_limit: Money::new(business.monthly_limit).rounded(),
      yearly_limit: Money::new(business.yearly_limit).rounded(),
      is_active: business.is_active,
      created_at: business.created_at,
    }
  }
}
