use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::application::business::BusinessResponse;
use crate::application::invoice::InvoiceSummaryDto;
use crate::domain::revenue::{Dashboard, LimitUsage, RevenueError, RevenueService};

#[derive(Debug, Clone, Serialize)]
pub struct LimitUsageDto {
  pub limit: Decimal,
  pub revenue: Decimal,
  /// Negative once the limit is exceeded
  pub remaining: Decimal,
  pub exceeded: bool,
}

impl From<LimitUsage> for LimitUsageDto {
  fn from(usage: LimitUsage) -> Self {
    Self {
      limit: usage.limit.rounded(),
      revenue: usage.revenue.rounded(),
      remaining: usage.remaining.rounded(),
      exceeded: usage.is_exceeded(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
  pub has_active_business: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub business: Option<BusinessResponse>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub as_of: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub monthly: Option<LimitUsageDto>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub yearly: Option<LimitUsageDto>,
  pub recent_invoices: Vec<InvoiceSummaryDto>,
}

impl From<Dashboard> for DashboardResponse {
  fn from(dashboard: Dashboard) -> Self {
    match dashboard {
      Dashboard::NoActiveBusiness => Self {
        has_active_business: false,
        business: None,
        as_of: None,
        monthly: None,
        yearly: None,
        recent_invoices: Vec::new(),
      },
      Dashboard::Active(active) => {
        let active = *active;
        Self {
          has_active_business: true,
          business: Some(active.business.into()),
          as_of: Some(active.as_of),
          monthly: Some(active.monthly.into()),
          yearly: Some(active.yearly.into()),
          recent_invoices: active.recent_invoices.into_iter().map(Into::into).collect(),
        }
      }
    }
  }
}

/// Revenue against limits for the month and year containing `today`
pub struct GetDashboardUseCase {
  revenue_service: Arc<RevenueService>,
}

impl GetDashboardUseCase {
  pub fn new(revenue_service: Arc<RevenueService>) -> Self {
    Self { revenue_service }
  }

  pub async fn execute(
    &self,
    user_id: i64,
    today: NaiveDate,
  ) -> Result<DashboardResponse, RevenueError> {
    let dashboard = self.revenue_service.dashboard(user_id, today).await?;
    Ok(dashboard.into())
  }
}
