use async_trait::async_trait;

use super::entities::{Business, BusinessProfile};
use super::errors::BusinessError;

/// Persistence for businesses.
///
/// Implementations must make `activate` atomic: after it returns, exactly one
/// business of the user is active, even under concurrent activations.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
  /// Inserts an inactive business.
  async fn create(&self, user_id: i64, profile: &BusinessProfile)
  -> Result<Business, BusinessError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Business>, BusinessError>;

  /// All businesses of a user, newest first.
  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Business>, BusinessError>;

  async fn update(&self, id: i64, profile: &BusinessProfile) -> Result<Business, BusinessError>;

  /// Deletes a business that has no invoices.
  ///
  /// Returns `BusinessError::HasInvoices` otherwise.
  async fn delete(&self, id: i64) -> Result<(), BusinessError>;

  /// Deactivates every business of `user_id` and activates `business_id` in
  /// one unit of work. `BusinessError::NotFound` if the user does not own it.
  async fn activate(&self, user_id: i64, business_id: i64) -> Result<Business, BusinessError>;

  async fn find_active(&self, user_id: i64) -> Result<Option<Business>, BusinessError>;
}
