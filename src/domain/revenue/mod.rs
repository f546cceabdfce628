pub mod entities;
pub mod errors;
pub mod services;

pub use entities::{ActiveDashboard, Dashboard, LimitUsage, remaining_limit};
pub use errors::RevenueError;
pub use services::{RECENT_INVOICES_LIMIT, RevenueService};
