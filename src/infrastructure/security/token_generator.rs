use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::auth::ports::TokenGenerator;
use crate::domain::auth::value_objects::SessionToken;

/// Session tokens from the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

impl TokenGenerator for SecureTokenGenerator {
  fn generate(&self) -> SessionToken {
    let mut bytes = [0u8; SessionToken::BYTE_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    SessionToken::from_bytes(bytes)
  }
}
