use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Password must be at least {min} characters long")]
  PasswordTooShort { min: usize },

  #[error("Password must not exceed 128 characters")]
  PasswordTooLong,

  #[error("Name is required")]
  NameRequired,

  #[error("Name must not exceed {max} characters")]
  NameTooLong { max: usize },

  #[error("Invalid session token format")]
  InvalidToken,
}

// ============================================================================
// Email
// ============================================================================

/// A syntactically valid, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into().trim().to_lowercase();

    if email.is_empty() || !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail);
    }

    Ok(Self(email))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ============================================================================
// Password (plain text, never stored)
// ============================================================================

/// Plain-text password. The buffer is wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const DEFAULT_MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Accepts any non-empty password up to the maximum length.
  ///
  /// Used for login, where the stored hash is the only authority.
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    Self::with_min_length(password, 1)
  }

  /// Accepts a password of at least `min_length` characters.
  pub fn with_min_length(
    password: impl Into<String>,
    min_length: usize,
  ) -> Result<Self, ValueObjectError> {
    let password = password.into();
    let length = password.chars().count();

    if length < min_length.max(1) {
      return Err(ValueObjectError::PasswordTooShort {
        min: min_length.max(1),
      });
    }
    if length > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash
// ============================================================================

/// Encoded password hash as produced by a [`super::ports::PasswordHasher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn new(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// DisplayName
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
  const MAX_LENGTH: usize = 255;

  pub fn new(name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let name = name.into();
    let trimmed = name.trim();

    if trimmed.is_empty() {
      return Err(ValueObjectError::NameRequired);
    }
    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::NameTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken / TokenHash
// ============================================================================

/// Opaque bearer token handed to the client. Only its hash is persisted.
#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  /// Number of random bytes behind a token (hex encoded on the wire).
  pub const BYTE_LENGTH: usize = 32;

  pub fn from_bytes(bytes: [u8; Self::BYTE_LENGTH]) -> Self {
    Self(hex::encode(bytes))
  }

  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::BYTE_LENGTH * 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token.to_ascii_lowercase()))
  }

  pub fn hash(&self) -> TokenHash {
    let digest = Sha256::digest(self.0.as_bytes());
    TokenHash(hex::encode(digest))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

/// SHA-256 hex digest of a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_is_trimmed_and_lowercased() {
    let email = Email::new("  Owner@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "owner@example.com");
  }

  #[test]
  fn test_email_rejects_garbage() {
    assert_eq!(Email::new("not-an-email"), Err(ValueObjectError::InvalidEmail));
    assert_eq!(Email::new(""), Err(ValueObjectError::InvalidEmail));
  }

  #[test]
  fn test_password_min_length() {
    assert!(Password::with_min_length("short", 8).is_err());
    assert!(Password::with_min_length("long enough", 8).is_ok());
    assert!(Password::new("x").is_ok());
    assert!(Password::new("").is_err());
  }

  #[test]
  fn test_password_max_length() {
    assert_eq!(
      Password::new("a".repeat(129)).unwrap_err(),
      ValueObjectError::PasswordTooLong
    );
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("hunter22").unwrap();
    assert_eq!(format!("{password:?}"), "Password(***)");
  }

  #[test]
  fn test_session_token_hash_is_stable_sha256() {
    let token = SessionToken::from_bytes([7u8; SessionToken::BYTE_LENGTH]);
    let parsed = SessionToken::from_string(token.as_str()).unwrap();

    assert_eq!(token.hash(), parsed.hash());
    assert_eq!(token.hash().as_str().len(), 64);
    assert_ne!(token.hash().as_str(), token.as_str());
  }

  #[test]
  fn test_session_token_rejects_wrong_shape() {
    assert!(SessionToken::from_string("abc").is_err());
    assert!(SessionToken::from_string("z".repeat(64)).is_err());
  }

  #[test]
  fn test_display_name_trims() {
    assert_eq!(DisplayName::new("  Jan ").unwrap().as_str(), "Jan");
    assert!(DisplayName::new("   ").is_err());
  }
}
