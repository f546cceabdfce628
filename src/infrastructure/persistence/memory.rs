//! In-process store implementing every repository port.
//!
//! One mutex guards all tables, so each repository call is a serializable
//! unit of work. Used by the service and HTTP tests, and handy for demos
//! without a database.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use crate::domain::auth::{
  AuthError, Email, NewSession, NewUser, Session, SessionRepository, User, UserRepository,
};
use crate::domain::business::{Business, BusinessError, BusinessProfile, BusinessRepository};
use crate::domain::errors::RepositoryError;
use crate::domain::invoice::{
  DateRange, Invoice, InvoiceError, InvoiceFilter, InvoiceItem, InvoiceNumber, InvoicePeriod,
  InvoiceRepository, InvoiceWithItems, Money, PricedInvoice,
};

#[derive(Default)]
struct Tables {
  last_id: i64,
  users: BTreeMap<i64, User>,
  sessions: BTreeMap<i64, Session>,
  businesses: BTreeMap<i64, Business>,
  invoices: BTreeMap<i64, Invoice>,
  items: BTreeMap<i64, InvoiceItem>,
  sequences: HashMap<(i64, i32, u32), u32>,
}

impl Tables {
  fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }

  fn invoices_in(&self, business_id: i64, range: DateRange) -> impl Iterator<Item = &Invoice> {
    self
      .invoices
      .values()
      .filter(move |i| i.business_id == business_id && range.contains(i.issue_date))
  }

  fn next_sequence(&self, business_id: i64, period: InvoicePeriod) -> Result<u32, InvoiceError> {
    let key = (business_id, period.year(), period.month());
    if let Some(last) = self.sequences.get(&key) {
      return Ok(last + 1);
    }
    let existing = self.invoices_in(business_id, period.range()?).count();
    Ok(u32::try_from(existing).unwrap_or(u32::MAX).saturating_add(1))
  }

  fn items_of(&self, invoice_id: i64) -> Vec<InvoiceItem> {
    self
      .items
      .values()
      .filter(|i| i.invoice_id == invoice_id)
      .cloned()
      .collect()
  }

  fn insert_items(&mut self, invoice_id: i64, priced: &PricedInvoice) -> Vec<InvoiceItem> {
    let mut stored = Vec::with_capacity(priced.items.len());
    for item in &priced.items {
      let id = self.next_id();
      let row = InvoiceItem {
        id,
        invoice_id,
        name: item.name.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        tax_rate: item.tax_rate,
        total_price: item.total.amount(),
      };
      self.items.insert(id, row.clone());
      stored.push(row);
    }
    stored
  }
}

#[derive(Default)]
pub struct InMemoryStore {
  tables: Mutex<Tables>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn invoice_row_count(&self) -> usize {
    self.tables.lock().await.invoices.len()
  }

  pub async fn item_row_count(&self) -> usize {
    self.tables.lock().await.items.len()
  }
}

#[async_trait]
impl UserRepository for InMemoryStore {
  async fn create(&self, user: NewUser) -> Result<User, AuthError> {
    let mut tables = self.tables.lock().await;
    if tables.users.values().any(|u| u.email == user.email) {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()).into());
    }

    let id = tables.next_id();
    let user = User {
      id,
      email: user.email,
      password_hash: user.password_hash,
      name: user.name,
      created_at: Utc::now(),
    };
    tables.users.insert(id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
    Ok(self.tables.lock().await.users.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let tables = self.tables.lock().await;
    Ok(
      tables
        .users
        .values()
        .find(|u| u.email == email.as_str())
        .cloned(),
    )
  }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
  async fn create(&self, session: NewSession) -> Result<Session, AuthError> {
    let mut tables = self.tables.lock().await;
    if !tables.users.contains_key(&session.user_id) {
      return Err(RepositoryError::ForeignKey("sessions_user_id_fkey".to_string()).into());
    }

    let id = tables.next_id();
    let session = Session {
      id,
      user_id: session.user_id,
      token_hash: session.token_hash,
      expires_at: session.expires_at,
      created_at: Utc::now(),
    };
    tables.sessions.insert(id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let tables = self.tables.lock().await;
    Ok(
      tables
        .sessions
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: i64) -> Result<(), AuthError> {
    self.tables.lock().await.sessions.remove(&session_id);
    Ok(())
  }

  async fn delete_expired(&self) -> Result<u64, AuthError> {
    let now = Utc::now();
    let mut tables = self.tables.lock().await;
    let before = tables.sessions.len();
    tables.sessions.retain(|_, s| !s.is_expired_at(now));
    Ok((before - tables.sessions.len()) as u64)
  }
}

#[async_trait]
impl BusinessRepository for InMemoryStore {
  async fn create(
    &self,
    user_id: i64,
    profile: &BusinessProfile,
  ) -> Result<Business, BusinessError> {
    let mut tables = self.tables.lock().await;
    let id = tables.next_id();
    let business = Business {
      id,
      user_id,
      name: profile.name.clone(),
      seller: profile.seller.clone(),
      monthly_limit: profile.monthly_limit,
      yearly_limit: profile.yearly_limit,
      is_active: false,
      created_at: Utc::now(),
    };
    tables.businesses.insert(id, business.clone());
    Ok(business)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Business>, BusinessError> {
    Ok(self.tables.lock().await.businesses.get(&id).cloned())
  }

  async fn list_by_user(&self, user_id: i64) -> Result<Vec<Business>, BusinessError> {
    let tables = self.tables.lock().await;
    let mut businesses: Vec<Business> = tables
      .businesses
      .values()
      .filter(|b| b.user_id == user_id)
      .cloned()
      .collect();
    businesses.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    Ok(businesses)
  }

  async fn update(&self, id: i64, profile: &BusinessProfile) -> Result<Business, BusinessError> {
    let mut tables = self.tables.lock().await;
    let business = tables
      .businesses
      .get_mut(&id)
      .ok_or(BusinessError::NotFound)?;

    business.name = profile.name.clone();
    business.seller = profile.seller.clone();
    business.monthly_limit = profile.monthly_limit;
    business.yearly_limit = profile.yearly_limit;
    Ok(business.clone())
  }

  async fn delete(&self, id: i64) -> Result<(), BusinessError> {
    let mut tables = self.tables.lock().await;
    let invoices = tables
      .invoices
      .values()
      .filter(|i| i.business_id == id)
      .count() as i64;
    if invoices > 0 {
      return Err(BusinessError::HasInvoices(invoices));
    }

    tables
      .businesses
      .remove(&id)
      .ok_or(BusinessError::NotFound)?;
    tables.sequences.retain(|(business_id, _, _), _| *business_id != id);
    Ok(())
  }

  async fn activate(&self, user_id: i64, business_id: i64) -> Result<Business, BusinessError> {
    let mut tables = self.tables.lock().await;
    match tables.businesses.get(&business_id) {
      Some(b) if b.is_owned_by(user_id) => {}
      _ => return Err(BusinessError::NotFound),
    }

    for business in tables.businesses.values_mut() {
      if business.user_id == user_id {
        business.is_active = business.id == business_id;
      }
    }

    tables
      .businesses
      .get(&business_id)
      .cloned()
      .ok_or(BusinessError::NotFound)
  }

  async fn find_active(&self, user_id: i64) -> Result<Option<Business>, BusinessError> {
    let tables = self.tables.lock().await;
    Ok(
      tables
        .businesses
        .values()
        .find(|b| b.user_id == user_id && b.is_active)
        .cloned(),
    )
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore {
  async fn create(
    &self,
    business_id: i64,
    priced: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let mut tables = self.tables.lock().await;
    if !tables.businesses.contains_key(&business_id) {
      return Err(RepositoryError::ForeignKey("invoices_business_id_fkey".to_string()).into());
    }

    let period = priced.period;
    let sequence = tables.next_sequence(business_id, period)?;
    let number = InvoiceNumber::compose(period, sequence).into_inner();
    if tables
      .invoices
      .values()
      .any(|i| i.business_id == business_id && i.invoice_number == number)
    {
      return Err(InvoiceError::NumberConflict(number));
    }
    tables
      .sequences
      .insert((business_id, period.year(), period.month()), sequence);

    let id = tables.next_id();
    let invoice = Invoice {
      id,
      business_id,
      invoice_number: number,
      issue_date: priced.issue_date,
      buyer: priced.buyer.clone(),
      notes: priced.notes.clone(),
      total_amount: priced.total.amount(),
      created_at: Utc::now(),
    };
    tables.invoices.insert(id, invoice.clone());
    let items = tables.insert_items(id, priced);

    Ok(InvoiceWithItems { invoice, items })
  }

  async fn update(
    &self,
    invoice_id: i64,
    priced: &PricedInvoice,
  ) -> Result<InvoiceWithItems, InvoiceError> {
    let mut tables = self.tables.lock().await;
    let invoice = {
      let invoice = tables
        .invoices
        .get_mut(&invoice_id)
        .ok_or(InvoiceError::NotFound)?;
      invoice.issue_date = priced.issue_date;
      invoice.buyer = priced.buyer.clone();
      invoice.notes = priced.notes.clone();
      invoice.total_amount = priced.total.amount();
      invoice.clone()
    };

    tables.items.retain(|_, item| item.invoice_id != invoice_id);
    let items = tables.insert_items(invoice_id, priced);

    Ok(InvoiceWithItems { invoice, items })
  }

  async fn delete(&self, invoice_id: i64) -> Result<(), InvoiceError> {
    let mut tables = self.tables.lock().await;
    tables
      .invoices
      .remove(&invoice_id)
      .ok_or(InvoiceError::NotFound)?;
    tables.items.retain(|_, item| item.invoice_id != invoice_id);
    Ok(())
  }

  async fn find_by_id(&self, invoice_id: i64) -> Result<Option<Invoice>, InvoiceError> {
    Ok(self.tables.lock().await.invoices.get(&invoice_id).cloned())
  }

  async fn find_items(&self, invoice_id: i64) -> Result<Vec<InvoiceItem>, InvoiceError> {
    Ok(self.tables.lock().await.items_of(invoice_id))
  }

  async fn list(
    &self,
    business_id: i64,
    filter: &InvoiceFilter,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let tables = self.tables.lock().await;
    let mut invoices: Vec<Invoice> = tables
      .invoices
      .values()
      .filter(|i| i.business_id == business_id && filter.matches(i))
      .cloned()
      .collect();
    invoices.sort_by(|a, b| {
      (b.issue_date, b.created_at, b.id).cmp(&(a.issue_date, a.created_at, a.id))
    });
    Ok(invoices)
  }

  async fn recent(&self, business_id: i64, limit: i64) -> Result<Vec<Invoice>, InvoiceError> {
    let tables = self.tables.lock().await;
    let mut invoices: Vec<Invoice> = tables
      .invoices
      .values()
      .filter(|i| i.business_id == business_id)
      .cloned()
      .collect();
    invoices.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    invoices.truncate(usize::try_from(limit).unwrap_or(0));
    Ok(invoices)
  }

  async fn sum_totals(&self, business_id: i64, range: DateRange) -> Result<Money, InvoiceError> {
    let tables = self.tables.lock().await;
    Ok(
      tables
        .invoices_in(business_id, range)
        .map(|i| Money::new(i.total_amount))
        .sum(),
    )
  }

  async fn peek_next_sequence(
    &self,
    business_id: i64,
    period: InvoicePeriod,
  ) -> Result<u32, InvoiceError> {
    self
      .tables
      .lock()
      .await
      .next_sequence(business_id, period)
  }
}
