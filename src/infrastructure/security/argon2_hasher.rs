use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher (19 MiB, 2 passes, 1 lane).
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  const MEMORY_COST_KIB: u32 = 19456;
  const TIME_COST: u32 = 2;
  const PARALLELISM: u32 = 1;

  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(
      Self::MEMORY_COST_KIB,
      Self::TIME_COST,
      Self::PARALLELISM,
      Some(32),
    )
    .map_err(|e| HashError::HashingFailed(format!("invalid Argon2 params: {e}")))?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordHash::new(hash.to_string()))
  }

  /// Constant-time comparison is done by `verify_password`.
  async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError> {
    let parsed = Argon2PasswordHash::new(hash.as_str()).map_err(|_| HashError::InvalidFormat)?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed)
    {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(e.to_string()).into()),
    }
  }
}
