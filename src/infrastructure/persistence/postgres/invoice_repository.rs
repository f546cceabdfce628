use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::domain::errors::RepositoryError;
use crate::domain::invoice::{
  BuyerIdentity, DateRange, Invoice, InvoiceError, InvoiceFilter, InvoiceItem, InvoiceNumber,
  InvoicePeriod, InvoiceRepository, InvoiceWithItems, Money, PricedInvoice,
};

const INVOICE_COLUMNS: &str = "id, business_id, invoice_number, issue_date, buyer_name, \
  buyer_address, buyer_tax_id, notes, total_amount, created_at";

const ITEM_COLUMNS: &str = "id, invoice_id, name, quantity, unit_price, tax_rate, total_price";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  business_id: i64,
  invoice_number: String,
  issue_date: NaiveDate,
  buyer_name: String,
  buyer_address: String,
  buyer_tax_id: Option<String>,
  notes: Option<String>,
  total_amount: Decimal,
  created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
  fn from(row: InvoiceRow) -> Self {
    Invoice {
      id: row.id,
      business_id: row.business_id,
      invoice_number: row.invoice_number,
      issue_date: row.issue_date,
      buyer: BuyerIdentity {
        name: row.buyer_name,
        address: row.buyer_address,
        tax_id: row.buyer_tax_id,
      },
      notes: row.notes,
      total_amount: row.total_amount,
      created_at: row.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
struct InvoiceItemRow {
  id: i64,
  invoice_id: i64,
  name: String,
  quantity: Decimal,
  unit_price: Decimal,
  tax_rate: Decimal,
  total_price: Decimal,
}

impl From<InvoiceItemRow> for InvoiceItem {
  fn from(row: InvoiceItemRow) -> Self {
    InvoiceItem {
      id: row.id,
      invoice_id: row.invoice_id,
      name: row.name,
      quantity: row.quantity,
      unit_price: row.unit_price,
      tax_rate: row.tax_rate,
      total_price: row.total_price,
    }
  }
}

fn db_error(err: sqlx::Error) -> InvoiceError {
  InvoiceError::Repository(RepositoryError::from(err))
}

fn sequence_from_db(value: i32) -> Result<u32, InvoiceError> {
  u32::try_from(value).map_err(|_| {
    InvoiceError::Repository(RepositoryError::CorruptData(format!(
      "negative invoice sequence {value}"
    )))
  })
}

/// `%needle%` for ILIKE with the wildcard characters escaped.
fn like_pattern(needle: &str) -> String {
  let mut escaped = String::with_capacity(needle.len() + 2);
  escaped.push('%');
  for c in needle.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped.push('%');
  escaped
}

/// PostgreSQL implementation of the InvoiceRepository trait
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Bumps the month counter, seeding it from existing invoices the first
  /// time. The row lock is held until the surrounding transaction ends.
  async fn allocate_sequence(
    tx: &mut Transaction<'_, Postgres>,
    business_id: i64,
    period: InvoicePeriod,
  ) -> Result<u32, InvoiceError> {
    let range = period.range()?;
    let value: i32 = sqlx::query_scalar(
      r#"
            INSERT INTO invoice_number_sequences (business_id, year, month, last_value)
            VALUES (
                $1, $2, $3,
                (SELECT COUNT(*) FROM invoices
                 WHERE business_id = $1 AND issue_date >= $4 AND issue_date < $5) + 1
            )
            ON CONFLICT (business_id, year, month)
            DO UPDATE SET last_value = invoice_number_sequences.last_value + 1
            RETURNING last_value
            "#,
    )
    .bind(business_id)
    .bind(period.year())
    .bind(period.month() as i32)
    .bind(range.start)
    .bind(range.end)
    .fetch_one(&mut **tx)
    .await
    .map_err(db_error)?;

    sequence_from_db(value)
  }

  async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: i64,
    priced: &PricedInvoice,
  ) -> Result<Vec<InvoiceItem>, InvoiceError> {
    let mut items = Vec::with_capacity(priced.items.len());
    for item in &priced.items {
      let row = sqlx::query_as::<_, InvoiceItemRow>(&format!(
        r#"
            INSERT INTO invoice_items (invoice_id, name, quantity, unit_price, tax_rate, total_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
      ))
      .bind(invoice_id)
      .bind(&item.name)
      .bind(item.quantity)
      .bind(item.unit_price)
      .bind(item.tax_rate)
      .bind(item.total.amount())
      .fetch_one(&mut **tx)
      .await
      .map_err(db_error)?;
      items.push(row.into());
    }
    Ok(items)
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(
    &self,
    business_id: i64,
    priced: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let mut tx = self.pool.begin().await.map_err(db_error)?;

    let sequence = Self::allocate_sequence(&mut tx, business_id, priced.period).await?;
    let number = InvoiceNumber::compose(priced.period, sequence);

    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            INSERT INTO invoices (
                business_id, invoice_number, issue_date, buyer_name, buyer_address,
                buyer_tax_id, notes, total_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(business_id)
    .bind(number.as_str())
    .bind(priced.issue_date)
    .bind(&priced.buyer.name)
    .bind(&priced.buyer.address)
    .bind(&priced.buyer.tax_id)
    .bind(&priced.notes)
    .bind(priced.total.amount())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match RepositoryError::from(e) {
      RepositoryError::DuplicateKey(_) => InvoiceError::NumberConflict(number.to_string()),
      other => InvoiceError::Repository(other),
    })?;

    let items = Self::insert_items(&mut tx, row.id, priced).await?;
    tx.commit().await.map_err(db_error)?;

    Ok(InvoiceWithItems {
      invoice: row.into(),
      items,
    })
  }

  async fn update(
    &self,
    invoice_id: i64,
    priced: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let mut tx = self.pool.begin().await.map_err(db_error)?;

    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            UPDATE invoices
            SET issue_date = $2,
                buyer_name = $3,
                buyer_address = $4,
                buyer_tax_id = $5,
                notes = $6,
                total_amount = $7
            WHERE id = $1
            RETURNING {INVOICE_COLUMNS}
            "#
    ))
    .bind(invoice_id)
    .bind(priced.issue_date)
    .bind(&priced.buyer.name)
    .bind(&priced.buyer.address)
    .bind(&priced.buyer.tax_id)
    .bind(&priced.notes)
    .bind(priced.total.amount())
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_error)?
    .ok_or(InvoiceError::NotFound)?;

    sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
      .bind(invoice_id)
      .execute(&mut *tx)
      .await
      .map_err(db_error)?;

    let items = Self::insert_items(&mut tx, invoice_id, priced).await?;
    tx.commit().await.map_err(db_error)?;

    Ok(InvoiceWithItems {
      invoice: row.into(),
      items,
    })
  }

  async fn delete(&self, invoice_id: i64) -> Result<(), InvoiceError> {
    // Items go with the invoice via ON DELETE CASCADE.
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(invoice_id)
      .execute(&self.pool)
      .await
      .map_err(db_error)?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::NotFound);
    }
    Ok(())
  }

  async fn find_by_id(&self, invoice_id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
    ))
    .bind(invoice_id)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(row.map(Into::into))
  }

  async fn find_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceItemRow>(&format!(
      "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = $1 ORDER BY id"
    ))
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn list(
    &self,
    business_id: i64,
    filter: &InvoiceFilter,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let range = filter.period.map(|p| p.range()).transpose()?;
    let pattern = filter.search.as_deref().map(like_pattern);

    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE business_id = $1
              AND ($2::TEXT IS NULL OR invoice_number ILIKE $2 OR buyer_name ILIKE $2)
              AND ($3::DATE IS NULL OR issue_date >= $3)
              AND ($4::DATE IS NULL OR issue_date < $4)
            ORDER BY issue_date DESC, created_at DESC, id DESC
            "#
    ))
    .bind(business_id)
    .bind(pattern)
    .bind(range.map(|r| r.start))
    .bind(range.map(|r| r.end))
    .fetch_all(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn recent(&self, business_id: i64, limit: i64) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices
            WHERE business_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
    ))
    .bind(business_id)
    .bind(limit)
    .fetch_all(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn sum_totals(&self, business_id: i64, range: DateRange) -> Result<Money, InvoiceError> {
    let total: Decimal = sqlx::query_scalar(
      r#"
            SELECT COALESCE(SUM(total_amount), 0)
            FROM invoices
            WHERE business_id = $1 AND issue_date >= $2 AND issue_date < $3
            "#,
    )
    .bind(business_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_one(&self.pool)
    .await
    .map_err(db_error)?;

    Ok(Money::new(total))
  }

  async fn peek_next_sequence(
    &self,
    business_id: i64,
    period: InvoicePeriod,
  ) -> Result<u32, InvoiceError> {
    let range = period.range()?;
    let next: i32 = sqlx::query_scalar(
      r#"
            SELECT COALESCE(
                (SELECT last_value FROM invoice_number_sequences
                 WHERE business_id = $1 AND year = $2 AND month = $3),
                (SELECT COUNT(*) FROM invoices
                 WHERE business_id = $1 AND issue_date >= $4 AND issue_date < $5)::INTEGER
            ) + 1
            "#,
    )
    .bind(business_id)
    .bind(period.year())
    .bind(period.month() as i32)
    .bind(range.start)
    .bind(range.end)
    .fetch_one(&self.pool)
    .await
    .map_err(db_error)?;

    sequence_from_db(next)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::services::test_support::invoice_input;
  use crate::infrastructure::persistence::postgres::test_support::{
    create_business, create_user, setup_test_db,
  };
  use futures_util::future::join_all;
  use rust_decimal_macros::dec;
  use std::sync::Arc;

  #[test]
  fn test_like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("inv/2025"), "%inv/2025%");
    assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
  }

  fn priced(date: NaiveDate, unit_price: Decimal) -> PricedInvoice {
    PricedInvoice::new(invoice_input(date, &[(dec!(1), unit_price, dec!(23))])).unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_concurrent_creates_get_distinct_numbers() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let business = create_business(&pool, user_id, "Alpha").await;
    let repo = Arc::new(PostgresInvoiceRepository::new(pool));

    let created = join_all((0..12).map(|_| {
      let repo = repo.clone();
      async move {
        repo
          .create(business.id, &priced(date(2025, 6, 15), dec!(10)))
          .await
      }
    }))
    .await;

    let mut numbers: Vec<String> = created
      .into_iter()
      .map(|r| r.unwrap().invoice.invoice_number)
      .collect();
    numbers.sort();
    let expected: Vec<String> = (1..=12).map(|n| format!("INV/2025/06/{:03}", n)).collect();
    assert_eq!(numbers, expected);
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_deleted_numbers_are_not_reused() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let business = create_business(&pool, user_id, "Alpha").await;
    let repo = PostgresInvoiceRepository::new(pool);

    let first = repo
      .create(business.id, &priced(date(2025, 6, 1), dec!(10)))
      .await
      .unwrap();
    let second = repo
      .create(business.id, &priced(date(2025, 6, 2), dec!(10)))
      .await
      .unwrap();
    assert_eq!(second.invoice.invoice_number, "INV/2025/06/002");

    repo.delete(second.invoice.id).await.unwrap();
    assert!(repo.find_items(second.invoice.id).await.unwrap().is_empty());

    let period = InvoicePeriod::of(date(2025, 6, 20)).unwrap();
    assert_eq!(repo.peek_next_sequence(business.id, period).await.unwrap(), 3);

    let third = repo
      .create(business.id, &priced(date(2025, 6, 3), dec!(10)))
      .await
      .unwrap();
    assert_eq!(third.invoice.invoice_number, "INV/2025/06/003");

    // A new month starts over
    let july = repo
      .create(business.id, &priced(date(2025, 7, 1), dec!(10)))
      .await
      .unwrap();
    assert_eq!(july.invoice.invoice_number, "INV/2025/07/001");
    assert_eq!(first.invoice.invoice_number, "INV/2025/06/001");
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_sum_totals_respects_range() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let business = create_business(&pool, user_id, "Alpha").await;
    let repo = PostgresInvoiceRepository::new(pool);

    repo
      .create(business.id, &priced(date(2025, 5, 31), dec!(100)))
      .await
      .unwrap();
    repo
      .create(business.id, &priced(date(2025, 6, 1), dec!(100)))
      .await
      .unwrap();
    repo
      .create(business.id, &priced(date(2025, 6, 30), dec!(0.01)))
      .await
      .unwrap();

    let june = InvoicePeriod::new(2025, 6).unwrap().range().unwrap();
    let total = repo.sum_totals(business.id, june).await.unwrap();
    assert_eq!(total.amount(), dec!(123.0123));

    let year = DateRange::year(2025).unwrap();
    let total = repo.sum_totals(business.id, year).await.unwrap();
    assert_eq!(total.amount(), dec!(246.0123));
  }

  #[tokio::test]
  #[ignore = "requires docker"]
  async fn test_list_filters_and_orders() {
    let (pool, _container) = setup_test_db().await;
    let user_id = create_user(&pool, "owner@example.com").await;
    let business = create_business(&pool, user_id, "Alpha").await;
    let repo = PostgresInvoiceRepository::new(pool);

    for day in [3, 1, 2] {
      repo
        .create(business.id, &priced(date(2025, 6, day), dec!(10)))
        .await
        .unwrap();
    }
    repo
      .create(business.id, &priced(date(2024, 12, 31), dec!(10)))
      .await
      .unwrap();

    let all = repo
      .list(business.id, &InvoiceFilter::new(None, None, None).unwrap())
      .await
      .unwrap();
    let dates: Vec<NaiveDate> = all.iter().map(|i| i.issue_date).collect();
    assert_eq!(
      dates,
      vec![date(2025, 6, 3), date(2025, 6, 2), date(2025, 6, 1), date(2024, 12, 31)]
    );

    let june = repo
      .list(
        business.id,
        &InvoiceFilter::new(Some("inv/2025".into()), Some(2025), Some(6)).unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(june.len(), 3);

    let by_buyer = repo
      .list(business.id, &InvoiceFilter::new(Some("ACME".into()), Some(2024), None).unwrap())
      .await
      .unwrap();
    assert_eq!(by_buyer.len(), 1);

    let recent = repo.recent(business.id, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].issue_date, date(2024, 12, 31));
  }
}
