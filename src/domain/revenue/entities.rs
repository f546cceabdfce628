use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::business::Business;
use crate::domain::invoice::{Invoice, Money};

/// Headroom under a revenue limit. Negative once the limit is exceeded.
pub fn remaining_limit(limit: Money, revenue: Money) -> Money {
  limit - revenue
}

/// Revenue booked against one limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitUsage {
  pub limit: Money,
  pub revenue: Money,
  pub remaining: Money,
}

impl LimitUsage {
  pub fn new(limit: Decimal, revenue: Money) -> Self {
    let limit = Money::new(limit);
    Self {
      limit,
      revenue,
      remaining: remaining_limit(limit, revenue),
    }
  }

  pub fn is_exceeded(&self) -> bool {
    self.remaining.amount().is_sign_negative() && !self.remaining.amount().is_zero()
  }
}

#[derive(Debug, Clone)]
pub struct ActiveDashboard {
  pub business: Business,
  pub as_of: NaiveDate,
  pub monthly: LimitUsage,
  pub yearly: LimitUsage,
  pub recent_invoices: Vec<Invoice>,
}

/// Home screen summary for a user.
#[derive(Debug, Clone)]
pub enum Dashboard {
  NoActiveBusiness,
  Active(Box<ActiveDashboard>),
}
