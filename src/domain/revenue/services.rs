use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use super::entities::{ActiveDashboard, Dashboard, LimitUsage};
use super::errors::RevenueError;
use crate::domain::business::BusinessRepository;
use crate::domain::invoice::{DateRange, InvoicePeriod, InvoiceRepository, Money};

/// Number of invoices shown on the dashboard.
pub const RECENT_INVOICES_LIMIT: i64 = 5;

/// Revenue aggregation over invoice totals, bucketed by issue date.
pub struct RevenueService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  business_repo: Arc<dyn BusinessRepository>,
}

impl RevenueService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    business_repo: Arc<dyn BusinessRepository>,
  ) -> Self {
    Self {
      invoice_repo,
      business_repo,
    }
  }

  /// Sum of invoice totals issued in the given calendar month.
  pub async fn monthly_revenue(
    &self,
    business_id: i64,
    year: i32,
    month: u32,
  ) -> Result<Money, RevenueError> {
    let range = InvoicePeriod::new(year, month)?.range()?;
    Ok(self.invoice_repo.sum_totals(business_id, range).await?)
  }

  /// Sum of invoice totals issued in the given calendar year.
  pub async fn yearly_revenue(&self, business_id: i64, year: i32) -> Result<Money, RevenueError> {
    let range = DateRange::year(year)?;
    Ok(self.invoice_repo.sum_totals(business_id, range).await?)
  }

  /// Limits usage for the month and year containing `today`, plus the most
  /// recently created invoices of the active business.
  pub async fn dashboard(&self, user_id: i64, today: NaiveDate) -> Result<Dashboard, RevenueError> {
    let Some(business) = self.business_repo.find_active(user_id).await? else {
      return Ok(Dashboard::NoActiveBusiness);
    };

    let monthly = self
      .monthly_revenue(business.id, today.year(), today.month())
      .await?;
    let yearly = self.yearly_revenue(business.id, today.year()).await?;
    let recent_invoices = self
      .invoice_repo
      .recent(business.id, RECENT_INVOICES_LIMIT)
      .await?;

    Ok(Dashboard::Active(Box::new(ActiveDashboard {
      monthly: LimitUsage::new(business.monthly_limit, monthly),
      yearly: LimitUsage::new(business.yearly_limit, yearly),
      as_of: today,
      recent_invoices,
      business,
    })))
  }
}
