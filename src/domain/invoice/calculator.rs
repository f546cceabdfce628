//! Line and invoice totals.
//!
//! All arithmetic is exact decimal. Nothing is rounded here; rounding to
//! two places happens only when amounts are rendered.

use rust_decimal::Decimal;

use super::value_objects::{Money, Quantity, TaxRate, UnitPrice, ValueObjectError};

/// Gross line total: `quantity * unit_price * (1 + tax_rate / 100)`.
pub fn line_total(quantity: Quantity, unit_price: UnitPrice, tax_rate: TaxRate) -> Money {
  Money::new(quantity.value() * unit_price.value() * tax_rate.gross_multiplier())
}

/// [`line_total`] over raw decimals, rejecting out-of-range inputs.
pub fn calculate_line_total(
  quantity: Decimal,
  unit_price: Decimal,
  tax_rate: Decimal,
) -> Result<Money, ValueObjectError> {
  Ok(line_total(
    Quantity::new(quantity)?,
    UnitPrice::new(unit_price)?,
    TaxRate::new(tax_rate)?,
  ))
}

/// Sum of line totals. An empty invoice totals zero.
pub fn invoice_total<I>(line_totals: I) -> Money
where
  I: IntoIterator<Item = Money>,
{
  line_totals.into_iter().sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_line_total_with_tax() {
    let total = calculate_line_total(dec!(2), dec!(100.00), dec!(23)).unwrap();
    assert_eq!(total.amount(), dec!(246.00));
  }

  #[test]
  fn test_line_total_without_tax() {
    let total = calculate_line_total(dec!(3), dec!(10.50), Decimal::ZERO).unwrap();
    assert_eq!(total.amount(), dec!(31.50));
  }

  #[test]
  fn test_zero_quantity_is_zero() {
    let total = calculate_line_total(Decimal::ZERO, dec!(99.99), dec!(23)).unwrap();
    assert_eq!(total, Money::ZERO);
  }

  #[test]
  fn test_line_total_is_not_rounded() {
    let total = calculate_line_total(dec!(1), dec!(0.01), dec!(23)).unwrap();
    assert_eq!(total.amount(), dec!(0.0123));
    assert_eq!(total.rounded(), dec!(0.01));
  }

  #[test]
  fn test_negative_inputs_rejected() {
    assert!(matches!(
      calculate_line_total(dec!(-1), dec!(10), dec!(23)),
      Err(ValueObjectError::InvalidQuantity(_))
    ));
    assert!(matches!(
      calculate_line_total(dec!(1), dec!(-10), dec!(23)),
      Err(ValueObjectError::InvalidUnitPrice(_))
    ));
    assert!(matches!(
      calculate_line_total(dec!(1), dec!(10), dec!(-5)),
      Err(ValueObjectError::InvalidTaxRate(_))
    ));
  }

  #[test]
  fn test_invoice_total_equals_sum_of_lines() {
    let lines = [
      calculate_line_total(dec!(1.5), dec!(33.33), dec!(8)).unwrap(),
      calculate_line_total(dec!(2), dec!(100.00), dec!(23)).unwrap(),
      calculate_line_total(dec!(7), dec!(0.99), dec!(5)).unwrap(),
    ];

    let total = invoice_total(lines);
    let expected = lines[0].amount() + lines[1].amount() + lines[2].amount();
    assert_eq!(total.amount(), expected);
  }

  #[test]
  fn test_empty_invoice_total_is_zero() {
    assert_eq!(invoice_total(Vec::new()), Money::ZERO);
  }
}
