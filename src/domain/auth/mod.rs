pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{NewSession, NewUser, Session, User};
pub use errors::{AuthError, HashError};
pub use ports::{PasswordHasher, SessionRepository, TokenGenerator, UserRepository};
pub use services::{AuthService, AuthSettings};
pub use value_objects::{
  DisplayName, Email, Password, PasswordHash, SessionToken, TokenHash, ValueObjectError,
};
