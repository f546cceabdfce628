use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, RegisterRequest, SuccessResponse},
  errors::ApiError,
  middleware::auth::extract_session_token,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, LogoutUserUseCase,
  RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /api/v1/auth/register
/// Response: 201 with the new session token and user
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = RegisterUserCommand {
    email: request.email,
    password: request.password,
    name: request.name,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(response))
}

/// Handler for user login
///
/// POST /api/v1/auth/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for user logout
///
/// POST /api/v1/auth/logout
/// Headers: Authorization: Bearer <token>
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;
  use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Successfully logged out".to_string(),
  }))
}

/// Handler for getting current user information
///
/// GET /api/v1/auth/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;
  let response = use_case.execute(session_token).await?;
  Ok(HttpResponse::Ok().json(response))
}
