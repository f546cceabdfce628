use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::get_current_user::GetCurrentUserResponse;
use crate::domain::auth::{AuthError, AuthService, Session, SessionToken, User};

#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Session handed to the client after login or registration
#[derive(Debug, Clone, Serialize)]
pub struct LoginUserResponse {
  /// Bearer token; only its hash is kept server-side
  pub token: String,
  pub expires_at: DateTime<Utc>,
  pub user: GetCurrentUserResponse,
}

impl LoginUserResponse {
  pub(super) fn new(user: User, session: Session, token: SessionToken) -> Self {
    Self {
      token: token.into_inner(),
      expires_at: session.expires_at,
      user: user.into(),
    }
  }
}

pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let (user, session, token) = self
      .auth_service
      .login(&command.email, &command.password)
      .await?;

    Ok(LoginUserResponse::new(user, session, token))
  }
}
