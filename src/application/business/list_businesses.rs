use std::sync::Arc;

use super::business_dto::BusinessResponse;
use crate::domain::business::{BusinessError, BusinessService};

pub struct ListBusinessesUseCase {
  business_service: Arc<BusinessService>,
}

impl ListBusinessesUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  /// Newest first
  pub async fn execute(&self, user_id: i64) -> Result<Vec<BusinessResponse>, BusinessError> {
    let businesses = self.business_service.list_businesses(user_id).await?;
    Ok(businesses.into_iter().map(Into::into).collect())
  }
}
