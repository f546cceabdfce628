use std::sync::Arc;

use crate::domain::business::{BusinessError, BusinessService};

/// Deletes a business that has no invoices.
pub struct DeleteBusinessUseCase {
  business_service: Arc<BusinessService>,
}

impl DeleteBusinessUseCase {
  pub fn new(business_service: Arc<BusinessService>) -> Self {
    Self { business_service }
  }

  pub async fn execute(&self, user_id: i64, business_id: i64) -> Result<(), BusinessError> {
    self
      .business_service
      .delete_business(user_id, business_id)
      .await
  }
}
