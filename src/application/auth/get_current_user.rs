use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, SessionToken, User};

/// Public view of a user account
#[derive(Debug, Clone, Serialize)]
pub struct GetCurrentUserResponse {
  pub id: i64,
  pub email: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

impl From<User> for GetCurrentUserResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      email: user.email,
      name: user.name,
      created_at: user.created_at,
    }
  }
}

/// Resolves a bearer token to the user it belongs to
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// `AuthError::InvalidSession` for malformed, unknown or expired tokens
  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token = SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidSession)?;
    let user = self.auth_service.validate_session(&token).await?;
    Ok(user.into())
  }
}
