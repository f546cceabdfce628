pub mod auth;
pub mod businesses;
pub mod dashboard;
pub mod health;
pub mod invoices;

use crate::adapters::http::{errors::ApiError, middleware::AuthenticatedUser};
use actix_web::{HttpMessage, HttpRequest};

/// Extract authenticated user from request extensions
pub fn get_user(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
  let user = req.extensions().get::<AuthenticatedUser>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: user not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
}
