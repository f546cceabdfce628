use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::get_user;
use crate::adapters::http::{
  dtos::{BusinessRequest, SuccessResponse},
  errors::ApiError,
};
use crate::application::business::{
  ActivateBusinessUseCase, CreateBusinessUseCase, DeleteBusinessUseCase, GetActiveBusinessUseCase,
  GetBusinessUseCase, ListBusinessesUseCase, UpdateBusinessUseCase,
};

/// GET /api/v1/businesses
pub async fn list_businesses_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<ListBusinessesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let businesses = use_case.execute(user.id).await?;
  Ok(HttpResponse::Ok().json(businesses))
}

/// POST /api/v1/businesses
pub async fn create_business_handler(
  req: HttpRequest,
  body: web::Json<BusinessRequest>,
  use_case: web::Data<Arc<CreateBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  body.validate()?;

  let business = use_case
    .execute(body.into_inner().into_command(user.id))
    .await?;
  Ok(HttpResponse::Created().json(business))
}

/// GET /api/v1/businesses/{id}
pub async fn get_business_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let business = use_case.execute(user.id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(business))
}

/// PUT /api/v1/businesses/{id}
pub async fn update_business_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  body: web::Json<BusinessRequest>,
  use_case: web::Data<Arc<UpdateBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  body.validate()?;

  let business = use_case
    .execute(path.into_inner(), body.into_inner().into_command(user.id))
    .await?;
  Ok(HttpResponse::Ok().json(business))
}

/// DELETE /api/v1/businesses/{id}
///
/// 409 while the business still has invoices.
pub async fn delete_business_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  use_case: web::Data<Arc<DeleteBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Business deleted".to_string(),
  }))
}

/// PUT /api/v1/businesses/{id}/activate
pub async fn activate_business_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  use_case: web::Data<Arc<ActivateBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let business = use_case.execute(user.id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(business))
}

/// GET /api/v1/businesses/active
pub async fn active_business_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<GetActiveBusinessUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let business = use_case.execute(user.id).await?;
  Ok(HttpResponse::Ok().json(business))
}
