use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid unit price: {0}")]
  InvalidUnitPrice(String),
  #[error("Invalid tax rate: {0}")]
  InvalidTaxRate(String),
  #[error("Invalid item name: {0}")]
  InvalidItemName(String),
  #[error("Invalid notes: {0}")]
  InvalidNotes(String),
  #[error("Invalid period: {0}")]
  InvalidPeriod(String),
}

// Money - exact decimal amount in the business currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
  pub const ZERO: Money = Money(Decimal::ZERO);

  pub fn new(amount: Decimal) -> Self {
    Self(amount)
  }

  /// The exact, unrounded amount.
  pub fn amount(&self) -> Decimal {
    self.0
  }

  /// Two decimal places, half away from zero. For presentation only.
  pub fn rounded(&self) -> Decimal {
    let mut value = self
      .0
      .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    value
  }
}

impl Add for Money {
  type Output = Money;

  fn add(self, rhs: Money) -> Money {
    Money(self.0 + rhs.0)
  }
}

impl Sub for Money {
  type Output = Money;

  fn sub(self, rhs: Money) -> Money {
    Money(self.0 - rhs.0)
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}

impl From<Decimal> for Money {
  fn from(amount: Decimal) -> Self {
    Money(amount)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.rounded())
  }
}

fn check_scale(
  value: Decimal,
  max_scale: u32,
  err: fn(String) -> ValueObjectError,
) -> Result<(), ValueObjectError> {
  if value.normalize().scale() > max_scale {
    return Err(err(format!("at most {max_scale} decimal places allowed")));
  }
  Ok(())
}

// Quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
  const MAX: Decimal = dec!(1000000000);

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    if value > Self::MAX {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity is too large".to_string(),
      ));
    }
    check_scale(value, 4, ValueObjectError::InvalidQuantity)?;
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Unit price (net)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
  const MAX: Decimal = dec!(1000000000000);

  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price cannot be negative".to_string(),
      ));
    }
    if value > Self::MAX {
      return Err(ValueObjectError::InvalidUnitPrice(
        "Unit price is too large".to_string(),
      ));
    }
    check_scale(value, 4, ValueObjectError::InvalidUnitPrice)?;
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Tax rate in percent, 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(Decimal);

impl TaxRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value.is_sign_negative() && !value.is_zero() {
      return Err(ValueObjectError::InvalidTaxRate(
        "Tax rate cannot be negative".to_string(),
      ));
    }
    if value > Decimal::ONE_HUNDRED {
      return Err(ValueObjectError::InvalidTaxRate(
        "Tax rate cannot exceed 100%".to_string(),
      ));
    }
    check_scale(value, 2, ValueObjectError::InvalidTaxRate)?;
    Ok(Self(value))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  /// Gross multiplier, e.g. 23% -> 1.23
  pub fn gross_multiplier(&self) -> Decimal {
    Decimal::ONE + self.0 / Decimal::ONE_HUNDRED
  }
}

// Line item name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemName(String);

impl ItemName {
  pub fn new(value: &str) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 500 {
      return Err(ValueObjectError::InvalidItemName(
        "Item name cannot exceed 500 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Free text printed under the items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNotes(String);

impl InvoiceNotes {
  const MAX_LENGTH: usize = 2000;

  /// Blank notes are treated as absent.
  pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ValueObjectError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
      return Ok(None);
    };
    if value.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidNotes(format!(
        "Notes cannot exceed {} characters",
        Self::MAX_LENGTH
      )));
    }
    Ok(Some(Self(value.to_string())))
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_money_rounding_is_half_away_from_zero() {
    assert_eq!(Money::new(dec!(1.005)).rounded(), dec!(1.01));
    assert_eq!(Money::new(dec!(-1.005)).rounded(), dec!(-1.01));
    assert_eq!(Money::new(dec!(1.004)).rounded(), dec!(1.00));
    assert_eq!(Money::new(dec!(246)).rounded().to_string(), "246.00");
  }

  #[test]
  fn test_money_sum() {
    let total: Money = [dec!(0.1), dec!(0.2)].into_iter().map(Money::new).sum();
    assert_eq!(total.amount(), dec!(0.3));
  }

  #[test]
  fn test_quantity_rejects_negative() {
    assert!(Quantity::new(dec!(-1)).is_err());
    assert!(Quantity::new(Decimal::ZERO).is_ok());
    assert!(Quantity::new(dec!(1.5)).is_ok());
  }

  #[test]
  fn test_quantity_limits() {
    assert!(Quantity::new(dec!(1000000000)).is_ok());
    assert!(Quantity::new(dec!(1000000000.0001)).is_err());
    assert!(Quantity::new(dec!(0.00001)).is_err());
    assert!(Quantity::new(dec!(2.50000)).is_ok());
  }

  #[test]
  fn test_unit_price_limits() {
    assert!(UnitPrice::new(dec!(-0.01)).is_err());
    assert!(UnitPrice::new(dec!(1000000000000)).is_ok());
    assert!(UnitPrice::new(dec!(1000000000000.01)).is_err());
  }

  #[test]
  fn test_tax_rate_bounds() {
    assert!(TaxRate::new(dec!(-1)).is_err());
    assert!(TaxRate::new(dec!(100.01)).is_err());
    assert!(TaxRate::new(dec!(100)).is_ok());
    assert!(TaxRate::new(dec!(8.5)).is_ok());
    assert_eq!(TaxRate::new(dec!(23)).unwrap().gross_multiplier(), dec!(1.23));
  }

  #[test]
  fn test_item_name() {
    assert!(ItemName::new("  ").is_err());
    assert_eq!(ItemName::new(" Consulting ").unwrap().value(), "Consulting");
  }

  #[test]
  fn test_notes_blank_is_none() {
    assert_eq!(InvoiceNotes::parse_optional(Some("   ")), Ok(None));
    assert!(InvoiceNotes::parse_optional(Some(&"x".repeat(2001))).is_err());
  }
}
