use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

fn required_text(
  value: &str,
  field: &'static str,
  max: usize,
) -> Result<String, ValidationError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::Required { field });
  }
  if trimmed.chars().count() > max {
    return Err(ValidationError::TooLong { field, max });
  }
  Ok(trimmed.to_string())
}

/// Label the owner uses to tell businesses apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessName(String);

impl BusinessName {
  pub fn new(name: &str) -> Result<Self, ValidationError> {
    required_text(name, "name", 255).map(Self)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Legal name of a seller or buyer as printed on an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyName(String);

impl PartyName {
  pub fn new(name: &str, field: &'static str) -> Result<Self, ValidationError> {
    required_text(name, field, 255).map(Self)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Free-form postal address, possibly multi-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyAddress(String);

impl PartyAddress {
  pub fn new(address: &str, field: &'static str) -> Result<Self, ValidationError> {
    required_text(address, field, 1000).map(Self)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Tax identification number (NIP, VAT id). Blank input means "none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxId(String);

impl TaxId {
  const MAX_LENGTH: usize = 32;

  pub fn parse_optional(
    value: Option<&str>,
    field: &'static str,
  ) -> Result<Option<Self>, ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
      return Ok(None);
    };

    if value.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::TooLong {
        field,
        max: Self::MAX_LENGTH,
      });
    }
    if !value
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
      return Err(ValidationError::InvalidCharacters { field });
    }

    Ok(Some(Self(value.to_string())))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Bank account number printed in the payment section. Blank means "none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountNumber(String);

impl BankAccountNumber {
  const MAX_LENGTH: usize = 64;

  pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ValidationError> {
    let field = "seller_bank_account";
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
      return Ok(None);
    };

    if value.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::TooLong {
        field,
        max: Self::MAX_LENGTH,
      });
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
      return Err(ValidationError::InvalidCharacters { field });
    }

    Ok(Some(Self(value.to_string())))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Non-negative revenue ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueLimit(Decimal);

impl RevenueLimit {
  pub fn new(amount: Decimal, field: &'static str) -> Result<Self, ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
      return Err(ValidationError::NegativeAmount { field });
    }
    Ok(Self(amount))
  }

  pub fn amount(&self) -> Decimal {
    self.0
  }
}

/// Default limits applied when a business is created without explicit ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueLimits {
  pub monthly: Decimal,
  pub yearly: Decimal,
}

impl Default for RevenueLimits {
  fn default() -> Self {
    Self {
      monthly: dec!(8000.00),
      yearly: dec!(20000.00),
    }
  }
}
