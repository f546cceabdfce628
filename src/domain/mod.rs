pub mod auth;
pub mod business;
pub mod errors;
pub mod invoice;
pub mod revenue;

pub use errors::{ErrorKind, RepositoryError};
