use std::sync::Arc;

use super::business_dto::{BusinessResponse, SaveBusinessCommand};
use crate::domain::business::{BusinessError, BusinessService};

/// Creates a business for the caller. New businesses start inactive.
pub struct CreateBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl CreateBusinessUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  pub async fn execute(
    &self,
    command: SaveBusinessCommand,
  ) -> Result<BusinessResponse, BusinessError> {
    let (user_id, input) = command.into_input();
    let business = self.business_service.create_business(user_id, input).await?;
    Ok(business.into())
  }
}

/// Replaces the fields of one of the caller's businesses.
pub struct UpdateBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl UpdateBusinessUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  pub async fn execute(
    &self,
    business_id: i64,
    command: SaveBusinessCommand,
  ) -> Result<BusinessResponse, BusinessError> {
    let (user_id, input) = command.into_input();
    let business = self
      .business_service
      .update_business(user_id, business_id, input)
      .await?;
    Ok(business.into())
  }
}
