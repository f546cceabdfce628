use std::sync::Arc;

use super::business_dto::BusinessResponse;
use crate::domain::business::{BusinessError, BusinessService};

/// Switches the caller's active business.
pub struct ActivateBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl ActivateBusinessUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  pub async fn execute(
    &self,
    user_id: i64,
    business_id: i64,
  ) -> Result<BusinessResponse, BusinessError> {
    let business = self
      .business_service
      .activate_business(user_id, business_id)
      .await?;
    Ok(business.into())
  }
}

pub struct GetActiveBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl GetActiveBusinessUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  /// `BusinessError::NoActiveBusiness` when none is selected
  pub async fn execute(&self, user_id: i64) -> Result<BusinessResponse, BusinessError> {
    let business = self
      .business_service
      .require_active_business(user_id)
      .await?;
    Ok(business.into())
  }
}
