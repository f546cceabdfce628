//! Business management use cases

mod activate_business;
mod business_dto;
mod delete_business;
mod get_business;
mod list_businesses;
mod save_business;

pub use activate_business::{ActivateBusinessUseCase, GetActiveBusinessUseCase};
pub use business_dto::{BusinessResponse, SaveBusinessCommand};
pub use delete_business::DeleteBusinessUseCase;
pub use get_business::GetBusinessUseCase;
pub use list_businesses::ListBusinessesUseCase;
pub use save_business::{CreateBusinessUseCase, UpdateBusinessUseCase};
