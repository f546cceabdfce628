//! Dashboard use case

mod get_dashboard;

pub use get_dashboard::{DashboardResponse, GetDashboardUseCase, LimitUsageDto};
