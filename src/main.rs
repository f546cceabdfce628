use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicedesk::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_api},
  domain::auth::AuthService,
  domain::business::BusinessService,
  domain::invoice::InvoiceService,
  domain::revenue::RevenueService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresBusinessRepository, PostgresInvoiceRepository, PostgresSessionRepository,
      PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, SecureTokenGenerator},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicedesk=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicedesk");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  let default_limits = config.limits.revenue_limits().map_err(|e| {
    tracing::error!("Invalid revenue limits: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;

  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let business_repo = Arc::new(PostgresBusinessRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));

  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to create password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?);
  let token_generator = Arc::new(SecureTokenGenerator::new());

  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_repo,
    password_hasher,
    token_generator,
    config.security.auth_settings(),
  ));
  let business_service = Arc::new(BusinessService::new(
    business_repo.clone(),
    default_limits,
  ));
  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo.clone(),
    business_repo.clone(),
  ));
  let revenue_service = Arc::new(RevenueService::new(invoice_repo, business_repo));

  if let Some(seed) = &config.seed {
    match auth_service
      .ensure_user(&seed.email, &seed.password, &seed.name)
      .await
    {
      Ok((user, true)) => tracing::info!(user_id = user.id, "Seeded default account"),
      Ok((user, false)) => tracing::debug!(user_id = user.id, "Default account already exists"),
      Err(e) => {
        tracing::error!("Failed to seed default account: {}", e);
        return Err(std::io::Error::other(e.to_string()));
      }
    }
  }

  match auth_service.purge_expired_sessions().await {
    Ok(0) => {}
    Ok(purged) => tracing::info!("Removed {} expired session(s)", purged),
    Err(e) => tracing::warn!("Could not purge expired sessions: {}", e),
  }

  let dependencies = ApiDependencies::new(
    auth_service,
    business_service,
    invoice_service,
    revenue_service,
  );

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(|cfg| configure_api(cfg, &dependencies))
  })
  .bind((server_host, server_port))?
  .run()
  .await
}
