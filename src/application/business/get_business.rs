use std::sync::Arc;

use super::business_dto::BusinessResponse;
use crate::domain::business::{BusinessError, BusinessService};

pub struct GetBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl GetBusinessUseCase {
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
      .get_business(user_id, business_id)
      .await?;
    Ok(business.into())
  }
}
