use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::domain::business::{
  Business, BusinessError, BusinessProfile, BusinessRepository, SellerIdentity,
};
use crate::domain::errors::RepositoryError;

const BUSINESS_COLUMNS: &str = "id, user_id, name, seller_name, seller_address, seller_tax_id, \
  seller_bank_account, monthly_limit, yearly_limit, is_active, created_at";

#[derive(Debug, FromRow)]
struct BusinessRow {
  id: i64,
  user_id: i64,
  name: String,
  seller_name: String,
  seller_address: String,
  seller_tax_id: Option<String>,
  seller_bank_account: Option<String>,
  monthly_limit: Decimal,
  yearly_limit: Decimal,
  is_active: bool,
  created_at: DateTime<Utc>,
}

impl From<BusinessRow> for Business {
  fn from(row: BusinessRow) -> Self {
    Business {
      id: row.id,
      user_id: row.user_id,
      name: row.name,
      seller: SellerIdentity {
        name: row.seller_name,
        address: row.seller_address,
        tax_id: row.seller_tax_id,
        bank_account: row.seller_bank_account,
      },
      monthly_limit: row.monthly_limit,
      yearly_limit: row.yearly_limit,
      is_active: row.is_active,
      created_at: row.created_at,
    }
  }
}

fn db_error(err: sqlx::Error) -> BusinessError {
  BusinessError::Repository(RepositoryError::from(err))
}

/// PostgreSQL implementation of the BusinessRepository trait
pub struct PostgresBusinessRepository {
  pool: PgPool,
}

impl PostgresBusinessRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
  async fn create(
    &self,
    user_id: i64,
    profile: &BusinessProfile,
  ) -> Result<Business, BusinessError> {
    let row = sqlx::query_as::<_, BusinessRow>(&format!(
      r#"
            INSERT INTO businesses (
                user_id, name, seller_name, seller_address, seller_tax_id,
                seller_bank_account, monthly_limit, yearly_limit, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            RETURNING {BUSINESS_COLUMNS}
            "#
    ))
    .bind(user_id)
    .bind(&profile.name)
    .bind(&profile.seller.name)
    .bind(&profile.seller.address)
    .bind(&profile.seller.tax_id)
    .bind(&profile.seller.bank_account)
    .bind(profile.monthly_limit)
    .bind(profile.yearly_limit)
    .fetch_one(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Business>, BusinessError> {
    let row = sqlx::query_as::<_, BusinessRow>(&format!(
      "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(row.map(Into::into))
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Business>, BusinessError> {
    let rows = sqlx::query_as::<_, BusinessRow>(&format!(
      r#"
            SELECT {BUSINESS_COLUMNS}
            FROM businesses
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn update(&self, id: i64, profile: &BusinessProfile) -> Result<Business, BusinessError> {
    let row = sqlx::query_as::<_, BusinessRow>(&format!(
      r#"
            UPDATE businesses
            SET name = $2,
                seller_name = $3,
                seller_address = $4,
                seller_tax_id = $5,
                seller_bank_account = $6,
                monthly_limit = $7,
                yearly_limit = $8
            WHERE id = $1
            RETURNING {BUSINESS_COLUMNS}
            "#
    ))
    .bind(id)
    .bind(&profile.name)
    .bind(&profile.seller.name)
    .bind(&profile.seller.address)
    .bind(&profile.seller.tax_id)
    .bind(&profile.seller.bank_account)
    .bind(profile.monthly_limit)
    .bind(profile.yearly_limit)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_error)?;

    row.map(Into::into).ok_or(BusinessError::NotFound)
  }

  async fn delete(&self, id: i64) -> Result<(), BusinessError> {
    let mut tx = self.pool.begin().await.map_err(db_error)?;

    // Locks the business row so no invoice can be attached mid-delete.
    let locked: Option<i64> =
      sqlx::query_scalar("SELECT id FROM businesses WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;
    if locked.is_none() {
      return Err(BusinessError::NotFound);
    }

    let invoices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE business_id = $1")
      .bind(id)
      .fetch_one(&mut *tx)
      .await
      .map_err(db_error)?;
    if invoices > 0 {
      return Err(BusinessError::HasInvoices(invoices));
    }

    sqlx::query("DELETE FROM businesses WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(|e| match RepositoryError::from(e) {
        // Raced with an invoice insert.
        RepositoryError::ForeignKey(_) => BusinessError::HasInvoices(1),
        other => BusinessError::Repository(other),
      })?;

    tx.commit().await.map_err(db_error)?;
    Ok(())
  }

  async fn activate(&self, user_id: i64, business_id: i64) -> Result<Business, BusinessError> {
    let mut tx = self.pool.begin().await.map_err(db_error)?;

    // Serializes concurrent activations for the same user.
    let owned: Vec<i64> = sqlx::query_scalar(
      "SELECT id FROM businesses WHERE user_id = $1 ORDER BY id FOR UPDATE",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await
    .map_err(db_error)?;

    if !owned.contains(&business_id) {
      return Err(BusinessError::NotFound);
    }

    sqlx::query("UPDATE businesses SET is_active = FALSE WHERE user_id = $1 AND is_active")
      .bind(user_id)
      .execute(&mut *tx)
      .await
      .map_err(db_error)?;

    let row = sqlx::query_as::<_, BusinessRow>(&format!(
      r#"
            UPDATE businesses
            SET is_active = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING {BUSINESS_COLUMNS}
            "#
    ))
    .bind(business_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;
    Ok(row.into())
  }

  async fn find_active(&self, user_id: i64) -> Result<Option<Business>, BusinessError> {
    let row = sqlx::query_as::<_, BusinessRow>(&format!(
      "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE user_id = $1 AND is_active"
    ))
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(row.map(Into::into))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::services::test_support::invoice_input;
  use crate::domain::invoice::{InvoiceRepository, PricedInvoice};
  use crate::infrastructure::persistence::postgres::PostgresInvoiceRepository;
  use crate::infrastructure::persistence::postgres::test_support::{
    create_business, create_user, setup_test_db,
  };
  use chrono::NaiveDate;
  use futures_util::future::join_all;
  use rust_decimal_macros::dec;
  use std::sync::Arc;

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_concurrent_activation_leaves_one_active() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let mut ids = Vec::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta"] {
      ids.push(create_business(&pool, user_id, name).await.id);
    }

    let repo = Arc::new(PostgresBusinessRepository::new(pool.clone()));
    let results = join_all(ids.iter().cycle().take(16).map(|&id| {
      let repo = repo.clone();
      async move { repo.activate(user_id, id).await }
    }))
    .await;
    assert!(results.iter().all(Result::is_ok));

    let active: i64 =
      sqlx::query_scalar("SELECT COUNT(*) FROM businesses WHERE user_id = $1 AND is_active")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(active, 1);
    assert!(repo.find_active(user_id).await.unwrap().is_some());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_activate_foreign_business_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let business = create_business(&pool, owner, "Alpha").await;

    let repo = PostgresBusinessRepository::new(pool);
    let result = repo.activate(other, business.id).await;

    assert!(matches!(result, Err(BusinessError::NotFound)));
    assert!(repo.find_active(owner).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_delete_is_blocked_by_invoices() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let business = create_business(&pool, user_id, "Alpha").await;

    let invoice = PricedInvoice::new(invoice_input(
      NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
      &[(dec!(1), dec!(100), dec!(23))],
    ))
    .unwrap();
    PostgresInvoiceRepository::new(pool.clone())
      .create(business.id, &invoice)
      .await
      .unwrap();

    let repo = PostgresBusinessRepository::new(pool.clone());
    let result = repo.delete(business.id).await;
    assert!(matches!(result, Err(BusinessError::HasInvoices(1))));

    let empty = create_business(&pool, user_id, "Beta").await;
    repo.delete(empty.id).await.unwrap();
    assert!(repo.find_by_id(empty.id).await.unwrap().is_none());
  }
}
