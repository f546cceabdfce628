//! Per-business, per-month invoice numbering.
//!
//! Numbers look like `INV/2025/06/001`. The sequence restarts every calendar
//! month of the issue date and is allocated by the repository inside the
//! same transaction that inserts the invoice.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::value_objects::ValueObjectError;

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl DateRange {
  /// January 1st of `year` up to, not including, January 1st of the next.
  pub fn year(year: i32) -> Result<Self, ValueObjectError> {
    check_year(year)?;
    let start = ymd(year, 1)?;
    let end = ymd(year + 1, 1)?;
    Ok(Self { start, end })
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    date >= self.start && date < self.end
  }
}

/// Calendar month an invoice belongs to, by issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoicePeriod {
  year: i32,
  month: u32,
}

impl InvoicePeriod {
  pub fn new(year: i32, month: u32) -> Result<Self, ValueObjectError> {
    check_year(year)?;
    if !(1..=12).contains(&month) {
      return Err(ValueObjectError::InvalidPeriod(format!(
        "month must be between 1 and 12, got {month}"
      )));
    }
    Ok(Self { year, month })
  }

  pub fn of(date: NaiveDate) -> Result<Self, ValueObjectError> {
    Self::new(date.year(), date.month())
  }

  pub fn year(&self) -> i32 {
    self.year
  }

  pub fn month(&self) -> u32 {
    self.month
  }

  pub fn range(&self) -> Result<DateRange, ValueObjectError> {
    let start = ymd(self.year, self.month)?;
    let end = if self.month == 12 {
      ymd(self.year + 1, 1)?
    } else {
      ymd(self.year, self.month + 1)?
    };
    Ok(DateRange { start, end })
  }
}

fn check_year(year: i32) -> Result<(), ValueObjectError> {
  if !(1..=9999).contains(&year) {
    return Err(ValueObjectError::InvalidPeriod(format!(
      "year must be between 1 and 9999, got {year}"
    )));
  }
  Ok(())
}

fn ymd(year: i32, month: u32) -> Result<NaiveDate, ValueObjectError> {
  NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or_else(|| ValueObjectError::InvalidPeriod(format!("{year}-{month:02} is not a date")))
}

/// Human-readable invoice identifier, unique within a business.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub const PREFIX: &'static str = "INV";

  /// Formats `INV/{year}/{month:02}/{sequence:03}`. Sequences above 999
  /// simply widen.
  pub fn compose(period: InvoicePeriod, sequence: u32) -> Self {
    Self(format!(
      "{}/{}/{:02}/{:03}",
      Self::PREFIX,
      period.year,
      period.month,
      sequence
    ))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn test_compose_pads_month_and_sequence() {
    let period = InvoicePeriod::new(2025, 6).unwrap();
    assert_eq!(InvoiceNumber::compose(period, 1).as_str(), "INV/2025/06/001");
    assert_eq!(InvoiceNumber::compose(period, 42).as_str(), "INV/2025/06/042");
    assert_eq!(InvoiceNumber::compose(period, 1000).as_str(), "INV/2025/06/1000");
  }

  #[test]
  fn test_period_of_date() {
    let period = InvoicePeriod::of(date(2025, 12, 31)).unwrap();
    assert_eq!((period.year(), period.month()), (2025, 12));
  }

  #[test]
  fn test_month_range_is_half_open() {
    let range = InvoicePeriod::new(2025, 6).unwrap().range().unwrap();
    assert!(!range.contains(date(2025, 5, 31)));
    assert!(range.contains(date(2025, 6, 1)));
    assert!(range.contains(date(2025, 6, 30)));
    assert!(!range.contains(date(2025, 7, 1)));
  }

  #[test]
  fn test_december_range_rolls_into_next_year() {
    let range = InvoicePeriod::new(2024, 12).unwrap().range().unwrap();
    assert_eq!(range.end, date(2025, 1, 1));
  }

  #[test]
  fn test_year_range() {
    let range = DateRange::year(2025).unwrap();
    assert!(range.contains(date(2025, 1, 1)));
    assert!(range.contains(date(2025, 12, 31)));
    assert!(!range.contains(date(2026, 1, 1)));
    assert!(!range.contains(date(2024, 12, 31)));
  }

  #[test]
  fn test_invalid_month_rejected() {
    assert!(InvoicePeriod::new(2025, 0).is_err());
    assert!(InvoicePeriod::new(2025, 13).is_err());
    assert!(InvoicePeriod::new(0, 1).is_err());
  }
}
