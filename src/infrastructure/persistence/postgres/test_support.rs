//! Throwaway PostgreSQL for repository tests. Needs a Docker daemon, so the
//! tests using it are `#[ignore]`d; run them with `cargo test -- --ignored`.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::ImageExt;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

use crate::domain::auth::{NewUser, UserRepository};
use crate::domain::business::services::test_support::business_input;
use crate::domain::business::{Business, BusinessProfile, BusinessRepository, RevenueLimits};

use super::{PostgresBusinessRepository, PostgresUserRepository};

pub async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
  let container = Postgres::default()
    .with_tag("16-alpine")
    .start()
    .await
    .expect("Failed to start postgres container");

  let host = container.get_host().await.expect("Failed to get host");
  let port = container
    .get_host_port_ipv4(5432)
    .await
    .expect("Failed to get port");
  let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

  let pool = PgPoolOptions::new()
    .max_connections(10)
    .connect(&database_url)
    .await
    .expect("Failed to connect to test database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  (pool, container)
}

pub async fn create_user(pool: &PgPool, email: &str) -> i64 {
  PostgresUserRepository::new(pool.clone())
    .create(NewUser {
      email: email.to_string(),
      password_hash: "$argon2id$unused".to_string(),
      name: "Owner".to_string(),
    })
    .await
    .expect("Failed to create user")
    .id
}

pub async fn create_business(pool: &PgPool, user_id: i64, name: &str) -> Business {
  let profile = BusinessProfile::new(business_input(name), RevenueLimits::default())
    .expect("valid business input");

  PostgresBusinessRepository::new(pool.clone())
    .create(user_id, &profile)
    .await
    .expect("Failed to create business")
}
