use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info};

use super::entities::{NewSession, NewUser, Session, User};
use super::errors::AuthError;
use super::ports::{PasswordHasher, SessionRepository, TokenGenerator, UserRepository};
use super::value_objects::{DisplayName, Email, Password, PasswordHash, SessionToken};
use crate::domain::errors::RepositoryError;

/// Tunables for [`AuthService`], filled from the `security` config section.
#[derive(Debug, Clone)]
pub struct AuthSettings {
  pub password_min_length: usize,
  pub session_ttl: Duration,
}

impl Default for AuthSettings {
  fn default() -> Self {
    Self {
      password_min_length: Password::DEFAULT_MIN_LENGTH,
      session_ttl: Duration::hours(24),
    }
  }
}

/// Authentication service: accounts and bearer-token sessions.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  settings: AuthSettings,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    settings: AuthSettings,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      token_generator,
      settings,
    }
  }

  /// Registers a new account and opens a session for it.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is already registered
  pub async fn register(
    &self,
    email: &str,
    password: &str,
    name: &str,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let email = Email::new(email)?;
    let password = Password::with_min_length(password, self.settings.password_min_length)?;
    let name = DisplayName::new(name)?;

    let user = self.create_user(email, &password, name).await?;
    info!(user_id = user.id, "user registered");

    let (session, token) = self.open_session(user.id).await?;
    Ok((user, session, token))
  }

  /// Verifies credentials and opens a new session.
  ///
  /// Unknown email and wrong password are indistinguishable to the caller.
  pub async fn login(
    &self,
    email: &str,
    password: &str,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(password).map_err(|_| AuthError::InvalidCredentials)?;

    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let stored = PasswordHash::new(user.password_hash.clone());
    if !self.password_hasher.verify(&password, &stored).await? {
      debug!(user_id = user.id, "password mismatch");
      return Err(AuthError::InvalidCredentials);
    }

    let (session, token) = self.open_session(user.id).await?;
    info!(user_id = user.id, "user logged in");
    Ok((user, session, token))
  }

  /// Ends the session identified by `token`.
  pub async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;
    Ok(())
  }

  /// Resolves a bearer token to its user. Expired sessions are removed.
  pub async fn validate_session(&self, token: &SessionToken) -> Result<User, AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)
  }

  /// Returns the user with `email`, creating it when absent.
  ///
  /// Used to seed an initial account at startup.
  pub async fn ensure_user(
    &self,
    email: &str,
    password: &str,
    name: &str,
  ) -> Result<(User, bool), AuthError> {
    let email = Email::new(email)?;
    if let Some(existing) = self.user_repo.find_by_email(&email).await? {
      return Ok((existing, false));
    }

    let password = Password::with_min_length(password, self.settings.password_min_length)?;
    let name = DisplayName::new(name)?;
    let user = self.create_user(email, &password, name).await?;
    Ok((user, true))
  }

  pub async fn purge_expired_sessions(&self) -> Result<u64, AuthError> {
    self.session_repo.delete_expired().await
  }

  async fn create_user(
    &self,
    email: Email,
    password: &Password,
    name: DisplayName,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(password).await?;
    let new_user = NewUser {
      email: email.into_inner(),
      password_hash: password_hash.into_inner(),
      name: name.into_inner(),
    };

    // Two concurrent registrations can both pass the lookup above.
    match self.user_repo.create(new_user).await {
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      other => other,
    }
  }

  async fn open_session(&self, user_id: i64) -> Result<(Session, SessionToken), AuthError> {
    let token = self.token_generator.generate();
    let session = self
      .session_repo
      .create(NewSession::with_ttl(
        user_id,
        token.hash().into_inner(),
        self.settings.session_ttl,
      ))
      .await?;
    Ok((session, token))
  }
}
