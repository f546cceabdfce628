use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::value_objects::{
  BankAccountNumber, BusinessName, PartyAddress, PartyName, RevenueLimit, RevenueLimits, TaxId,
};

/// Seller block printed on every invoice of a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerIdentity {
  pub name: String,
  pub address: String,
  pub tax_id: Option<String>,
  pub bank_account: Option<String>,
}

/// A legal/tax identity owned by a user, under which invoices are issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub seller: SellerIdentity,
  pub monthly_limit: Decimal,
  pub yearly_limit: Decimal,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

impl Business {
  pub fn is_owned_by(&self, user_id: i64) -> bool {
    self.user_id == user_id
  }

  pub fn limits(&self) -> RevenueLimits {
    RevenueLimits {
      monthly: self.monthly_limit,
      yearly: self.yearly_limit,
    }
  }
}

/// Unvalidated business fields as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct BusinessInput {
  pub name: String,
  pub seller_name: String,
  pub seller_address: String,
  pub seller_tax_id: Option<String>,
  pub seller_bank_account: Option<String>,
  pub monthly_limit: Option<Decimal>,
  pub yearly_limit: Option<Decimal>,
}

/// Validated, normalized business fields ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessProfile {
  pub name: String,
  pub seller: SellerIdentity,
  pub monthly_limit: Decimal,
  pub yearly_limit: Decimal,
}

impl BusinessProfile {
  /// Validates `input`; limits it leaves out are taken from `fallback`.
  pub fn new(input: BusinessInput, fallback: RevenueLimits) -> Result<Self, ValidationError> {
    let name = BusinessName::new(&input.name)?;
    let seller_name = PartyName::new(&input.seller_name, "seller_name")?;
    let seller_address = PartyAddress::new(&input.seller_address, "seller_address")?;
    let tax_id = TaxId::parse_optional(input.seller_tax_id.as_deref(), "seller_tax_id")?;
    let bank_account = BankAccountNumber::parse_optional(input.seller_bank_account.as_deref())?;
    let monthly = RevenueLimit::new(
      input.monthly_limit.unwrap_or(fallback.monthly),
      "monthly_limit",
    )?;
    let yearly = RevenueLimit::new(
      input.yearly_limit.unwrap_or(fallback.yearly),
      "yearly_limit",
    )?;

    Ok(Self {
      name: name.as_str().to_string(),
      seller: SellerIdentity {
        name: seller_name.as_str().to_string(),
        address: seller_address.as_str().to_string(),
        tax_id: tax_id.map(|t| t.as_str().to_string()),
        bank_account: bank_account.map(|b| b.as_str().to_string()),
      },
      monthly_limit: monthly.amount(),
      yearly_limit: yearly.amount(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn input() -> BusinessInput {
    BusinessInput {
      name: " Consulting ".into(),
      seller_name: "Jan Kowalski Consulting".into(),
      seller_address: "ul. Prosta 1\n00-001 Warszawa".into(),
      seller_tax_id: Some("".into()),
      ..Default::default()
    }
  }

  #[test]
  fn test_profile_applies_default_limits() {
    let profile = BusinessProfile::new(input(), RevenueLimits::default()).unwrap();

    assert_eq!(profile.name, "Consulting");
    assert_eq!(profile.monthly_limit, dec!(8000));
    assert_eq!(profile.yearly_limit, dec!(20000));
    assert_eq!(profile.seller.tax_id, None);
  }

  #[test]
  fn test_profile_keeps_explicit_limits() {
    let mut raw = input();
    raw.monthly_limit = Some(dec!(3000));
    raw.yearly_limit = Some(Decimal::ZERO);

    let profile = BusinessProfile::new(raw, RevenueLimits::default()).unwrap();
    assert_eq!(profile.monthly_limit, dec!(3000));
    assert_eq!(profile.yearly_limit, Decimal::ZERO);
  }

  #[test]
  fn test_profile_requires_seller_address() {
    let mut raw = input();
    raw.seller_address = " ".into();

    assert_eq!(
      BusinessProfile::new(raw, RevenueLimits::default()),
      Err(ValidationError::Required {
        field: "seller_address"
      })
    );
  }

  #[test]
  fn test_profile_rejects_negative_limit() {
    let mut raw = input();
    raw.yearly_limit = Some(dec!(-1));

    assert!(matches!(
      BusinessProfile::new(raw, RevenueLimits::default()),
      Err(ValidationError::NegativeAmount { .. })
    ));
  }
}
