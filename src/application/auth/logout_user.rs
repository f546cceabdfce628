use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, SessionToken};

/// Use case for ending the caller's session
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, session_token: String) -> Result<(), AuthError> {
    let token = SessionToken::from_string(session_token).map_err(|_| AuthError::InvalidSession)?;
    self.auth_service.logout(&token).await
  }
}
