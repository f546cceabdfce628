use std::sync::Arc;
use tracing::info;

use super::entities::{Business, BusinessInput, BusinessProfile};
use super::errors::BusinessError;
use super::ports::BusinessRepository;
use super::value_objects::RevenueLimits;

/// Business management: CRUD scoped to the owner plus active selection.
pub struct BusinessService {
  business_repo: Arc<dyn BusinessRepository>,
  default_limits: RevenueLimits,
}

impl BusinessService {
  pub fn new(business_repo: Arc<dyn BusinessRepository>, default_limits: RevenueLimits) -> Self {
    Self {
      business_repo,
      default_limits,
    }
  }

  pub async fn list_businesses(&self, user_id: i64) -> Result<Vec<Business>, BusinessError> {
    self.business_repo.list_by_user(user_id).await
  }

  /// Loads a business, hiding ones owned by somebody else.
  pub async fn get_business(&self, user_id: i64, business_id: i64) -> Result<Business, BusinessError> {
    self
      .business_repo
      .find_by_id(business_id)
      .await?
      .filter(|b| b.is_owned_by(user_id))
      .ok_or(BusinessError::NotFound)
  }

  pub async fn create_business(
    &self,
    user_id: i64,
    input: BusinessInput,
  ) -> Result<Business, BusinessError> {
    let profile = BusinessProfile::new(input, self.default_limits)?;
    let business = self.business_repo.create(user_id, &profile).await?;
    info!(user_id, business_id = business.id, "business created");
    Ok(business)
  }

  /// Replaces the business fields. Omitted limits keep their current value.
  pub async fn update_business(
    &self,
    user_id: i64,
    business_id: i64,
    input: BusinessInput,
  ) -> Result<Business, BusinessError> {
    let current = self.get_business(user_id, business_id).await?;
    let profile = BusinessProfile::new(input, current.limits())?;
    self.business_repo.update(business_id, &profile).await
  }

  pub async fn delete_business(&self, user_id: i64, business_id: i64) -> Result<(), BusinessError> {
    self.get_business(user_id, business_id).await?;
    self.business_repo.delete(business_id).await?;
    info!(user_id, business_id, "business deleted");
    Ok(())
  }

  /// Makes `business_id` the user's only active business.
  pub async fn activate_business(
    &self,
    user_id: i64,
    business_id: i64,
  ) -> Result<Business, BusinessError> {
    let business = self.business_repo.activate(user_id, business_id).await?;
    info!(user_id, business_id, "business activated");
    Ok(business)
  }

  pub async fn active_business(&self, user_id: i64) -> Result<Option<Business>, BusinessError> {
    self.business_repo.find_active(user_id).await
  }

  /// Like [`Self::active_business`] but fails when nothing is selected.
  pub async fn require_active_business(&self, user_id: i64) -> Result<Business, BusinessError> {
    self
      .active_business(user_id)
      .await?
      .ok_or(BusinessError::NoActiveBusiness)
  }
}

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;

  pub fn business_input(name: &str) -> BusinessInput {
    BusinessInput {
      name: name.to_string(),
      seller_name: format!("{name} Sp. z o.o."),
      seller_address: "ul. Prosta 1, 00-001 Warszawa".to_string(),
      seller_tax_id: Some("1234563218".to_string()),
      seller_bank_account: None,
      monthly_limit: None,
      yearly_limit: None,
    }
  }
}
