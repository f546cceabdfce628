use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;

use super::get_user;
use crate::adapters::http::errors::ApiError;
use crate::application::dashboard::GetDashboardUseCase;

/// GET /api/v1/dashboard
///
/// Revenue is computed for the server's current UTC date.
pub async fn dashboard_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<GetDashboardUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let today = Utc::now().date_naive();

  let dashboard = use_case.execute(user.id, today).await?;
  Ok(HttpResponse::Ok().json(dashboard))
}
