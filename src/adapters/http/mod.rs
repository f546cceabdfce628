pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::ApiError;
pub use middleware::{AuthMiddleware, AuthenticatedUser, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{ApiDependencies, configure_api};
