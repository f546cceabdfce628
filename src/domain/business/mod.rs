pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Business, BusinessInput, BusinessProfile, SellerIdentity};
pub use errors::{BusinessError, ValidationError};
pub use ports::BusinessRepository;
pub use services::BusinessService;
pub use value_objects::{
  BankAccountNumber, BusinessName, PartyAddress, PartyName, RevenueLimit, RevenueLimits, TaxId,
};
