use std::sync::Arc;

use super::login_user::LoginUserResponse;
use crate::domain::auth::{AuthError, AuthService};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  /// Plain text, hashed before storage
  pub password: String,
  pub name: String,
}

/// Use case for registering a new user. The caller is logged in right away.
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: RegisterUserCommand) -> Result<LoginUserResponse, AuthError> {
    let (user, session, token) = self
      .auth_service
      .register(&command.email, &command.password, &command.name)
      .await?;

    Ok(LoginUserResponse::new(user, session, token))
  }
}
