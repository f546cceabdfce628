use actix_web::{
  HttpRequest,
  error::{JsonPayloadError, PathError, QueryPayloadError},
  web,
};
use std::sync::Arc;

use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase,
};
use crate::application::business::{
  ActivateBusinessUseCase, CreateBusinessUseCase, DeleteBusinessUseCase, GetActiveBusinessUseCase,
  GetBusinessUseCase, ListBusinessesUseCase, UpdateBusinessUseCase,
};
use crate::application::dashboard::GetDashboardUseCase;
use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  PreviewInvoiceNumberUseCase, UpdateInvoiceUseCase,
};
use crate::domain::auth::AuthService;
use crate::domain::business::BusinessService;
use crate::domain::invoice::InvoiceService;
use crate::domain::revenue::RevenueService;

use super::errors::ApiError;
use super::handlers::{auth, businesses, dashboard, health, invoices};
use super::middleware::AuthMiddleware;

/// Every use case the JSON API needs, built once and shared by all workers
#[derive(Clone)]
pub struct ApiDependencies {
  pub register: Arc<RegisterUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub logout: Arc<LogoutUserUseCase>,
  pub current_user: Arc<GetCurrentUserUseCase>,

  pub list_businesses: Arc<ListBusinessesUseCase>,
  pub create_business: Arc<CreateBusinessUseCase>,
  pub get_business: Arc<GetBusinessUseCase>,
  pub update_business: Arc<UpdateBusinessUseCase>,
  pub delete_business: Arc<DeleteBusinessUseCase>,
  pub activate_business: Arc<ActivateBusinessUseCase>,
  pub active_business: Arc<GetActiveBusinessUseCase>,

  pub list_invoices: Arc<ListInvoicesUseCase>,
  pub create_invoice: Arc<CreateInvoiceUseCase>,
  pub get_invoice: Arc<GetInvoiceDetailsUseCase>,
  pub update_invoice: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice: Arc<DeleteInvoiceUseCase>,
  pub preview_invoice_number: Arc<PreviewInvoiceNumberUseCase>,

  pub dashboard: Arc<GetDashboardUseCase>,
}

impl ApiDependencies {
  pub fn new(
    auth_service: Arc<AuthService>,
    business_service: Arc<BusinessService>,
    invoice_service: Arc<InvoiceService>,
    revenue_service: Arc<RevenueService>,
  ) -> Self {
    Self {
      register: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      logout: Arc::new(LogoutUserUseCase::new(auth_service.clone())),
      current_user: Arc::new(GetCurrentUserUseCase::new(auth_service)),

      list_businesses: Arc::new(ListBusinessesUseCase::new(business_service.clone())),
      create_business: Arc::new(CreateBusinessUseCase::new(business_service.clone())),
      get_business: Arc::new(GetBusinessUseCase::new(business_service.clone())),
      update_business: Arc::new(UpdateBusinessUseCase::new(business_service.clone())),
      delete_business: Arc::new(DeleteBusinessUseCase::new(business_service.clone())),
      activate_business: Arc::new(ActivateBusinessUseCase::new(business_service.clone())),
      active_business: Arc::new(GetActiveBusinessUseCase::new(business_service)),

      list_invoices: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
      create_invoice: Arc::new(CreateInvoiceUseCase::new(invoice_service.clone())),
      get_invoice: Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone())),
      update_invoice: Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone())),
      delete_invoice: Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone())),
      preview_invoice_number: Arc::new(PreviewInvoiceNumberUseCase::new(invoice_service)),

      dashboard: Arc::new(GetDashboardUseCase::new(revenue_service)),
    }
  }
}

/// Mounts `/health` and the whole `/api/v1` tree
///
/// Everything except `/api/v1/auth` sits behind `AuthMiddleware`. Bodies,
/// query strings and path ids that fail to parse answer with the same JSON
/// error envelope as every other failure.
pub fn configure_api(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .route("/health", web::get().to(health::health_check))
    .service(
      web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(web::scope("/auth").configure(|cfg| configure_auth_routes(cfg, deps)))
        .service(
          web::scope("/businesses")
            .wrap(AuthMiddleware::new(deps.current_user.clone()))
            .configure(|cfg| configure_business_routes(cfg, deps)),
        )
        .service(
          web::scope("/invoices")
            .wrap(AuthMiddleware::new(deps.current_user.clone()))
            .configure(|cfg| configure_invoice_routes(cfg, deps)),
        )
        .service(
          web::scope("/dashboard")
            .wrap(AuthMiddleware::new(deps.current_user.clone()))
            .configure(|cfg| configure_dashboard_routes(cfg, deps)),
        ),
    );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::validation(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::validation(err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::validation(err.to_string()).into()
}

/// Configure authentication routes
///
/// - POST /register
/// - POST /login
/// - POST /logout
/// - GET /me
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.register.clone()))
    .app_data(web::Data::new(deps.login.clone()))
    .app_data(web::Data::new(deps.logout.clone()))
    .app_data(web::Data::new(deps.current_user.clone()))
    .route("/register", web::post().to(auth::register_handler))
    .route("/login", web::post().to(auth::login_handler))
    .route("/logout", web::post().to(auth::logout_handler))
    .route("/me", web::get().to(auth::get_current_user_handler));
}

/// Configure business routes
///
/// `/active` is registered before `/{id}` so it is not taken for an id.
pub fn configure_business_routes(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_businesses.clone()))
    .app_data(web::Data::new(deps.create_business.clone()))
    .app_data(web::Data::new(deps.get_business.clone()))
    .app_data(web::Data::new(deps.update_business.clone()))
    .app_data(web::Data::new(deps.delete_business.clone()))
    .app_data(web::Data::new(deps.activate_business.clone()))
    .app_data(web::Data::new(deps.active_business.clone()))
    .route("", web::get().to(businesses::list_businesses_handler))
    .route("", web::post().to(businesses::create_business_handler))
    .route("/active", web::get().to(businesses::active_business_handler))
    .route("/{id}", web::get().to(businesses::get_business_handler))
    .route("/{id}", web::put().to(businesses::update_business_handler))
    .route("/{id}", web::delete().to(businesses::delete_business_handler))
    .route(
      "/{id}/activate",
      web::put().to(businesses::activate_business_handler),
    );
}

/// Configure invoice routes
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_invoices.clone()))
    .app_data(web::Data::new(deps.create_invoice.clone()))
    .app_data(web::Data::new(deps.get_invoice.clone()))
    .app_data(web::Data::new(deps.update_invoice.clone()))
    .app_data(web::Data::new(deps.delete_invoice.clone()))
    .app_data(web::Data::new(deps.preview_invoice_number.clone()))
    .route("", web::get().to(invoices::list_invoices_handler))
    .route("", web::post().to(invoices::create_invoice_handler))
    .route(
      "/next-number",
      web::get().to(invoices::next_invoice_number_handler),
    )
    .route("/{id}", web::get().to(invoices::get_invoice_handler))
    .route("/{id}", web::put().to(invoices::update_invoice_handler))
    .route("/{id}", web::delete().to(invoices::delete_invoice_handler));
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.dashboard.clone()))
    .route("", web::get().to(dashboard::dashboard_handler));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::services::test_support::auth_service;
  use crate::domain::business::RevenueLimits;
  use crate::infrastructure::persistence::memory::InMemoryStore;
  use actix_web::{
    App,
    http::StatusCode,
    test::{self, TestRequest},
  };
  use serde_json::{Value, json};

  fn dependencies(store: &Arc<InMemoryStore>) -> ApiDependencies {
    ApiDependencies::new(
      Arc::new(auth_service(store)),
      Arc::new(BusinessService::new(store.clone(), RevenueLimits::default())),
      Arc::new(InvoiceService::new(store.clone(), store.clone())),
      Arc::new(RevenueService::new(store.clone(), store.clone())),
    )
  }

  macro_rules! register {
    ($app:expr, $email:expr) => {{
      let req = TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": $email, "password": "password123", "name": "Owner" }))
        .to_request();
      let body: Value = test::call_and_read_body_json($app, req).await;
      body["token"].as_str().unwrap().to_string()
    }};
  }

  fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
  }

  fn business_body() -> Value {
    json!({
      "name": "Studio",
      "seller_name": "Jane Doe Studio",
      "seller_address": "Main St 1",
      "seller_tax_id": "1234563218"
    })
  }

  fn invoice_body(issue_date: &str) -> Value {
    json!({
      "issue_date": issue_date,
      "buyer_name": "Acme Corp",
      "buyer_address": "Market Square 1",
      "items": [
        { "name": "Consulting", "quantity": "2", "unit_price": "100.00", "tax_rate": "23" }
      ]
    })
  }

  #[actix_web::test]
  async fn test_health_check() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
  }

  #[actix_web::test]
  async fn test_protected_scopes_require_token() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

    for uri in ["/api/v1/businesses", "/api/v1/invoices", "/api/v1/dashboard"] {
      let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
  }

  #[actix_web::test]
  async fn test_login_and_me() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    register!(&app, "owner@example.com");

    let req = TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({ "email": "owner@example.com", "password": "wrong-password" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({ "email": "owner@example.com", "password": "password123" }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = TestRequest::get()
      .uri("/api/v1/auth/me")
      .insert_header(bearer(&token))
      .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], "owner@example.com");

    let req = TestRequest::post()
      .uri("/api/v1/auth/logout")
      .insert_header(bearer(&token))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
      .uri("/api/v1/auth/me")
      .insert_header(bearer(&token))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn test_duplicate_registration_is_conflict() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    register!(&app, "owner@example.com");

    let req = TestRequest::post()
      .uri("/api/v1/auth/register")
      .set_json(json!({ "email": "owner@example.com", "password": "password123", "name": "Again" }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[actix_web::test]
  async fn test_invoice_flow() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    let token = register!(&app, "owner@example.com");

    // No active business yet
    let req = TestRequest::get()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&token))
      .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list, json!([]));

    let req = TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&token))
      .set_json(invoice_body("2024-06-15"))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "no_active_business");

    let req = TestRequest::post()
      .uri("/api/v1/businesses")
      .insert_header(bearer(&token))
      .set_json(business_body())
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let business: Value = test::read_body_json(resp).await;
    assert_eq!(business["is_active"], false);
    assert_eq!(business["monthly_limit"], "8000.00");
    let business_id = business["id"].as_i64().unwrap();

    let req = TestRequest::put()
      .uri(&format!("/api/v1/businesses/{}/activate", business_id))
      .insert_header(bearer(&token))
      .to_request();
    let activated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(activated["is_active"], true);

    let req = TestRequest::get()
      .uri("/api/v1/businesses/active")
      .insert_header(bearer(&token))
      .to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active["id"], business_id);

    let req = TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&token))
      .set_json(invoice_body("2024-06-15"))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invoice: Value = test::read_body_json(resp).await;
    assert_eq!(invoice["invoice_number"], "INV/2024/06/001");
    assert_eq!(invoice["total_amount"], "246.00");
    let invoice_id = invoice["id"].as_i64().unwrap();

    let req = TestRequest::get()
      .uri("/api/v1/invoices/next-number?issue_date=2024-06-20")
      .insert_header(bearer(&token))
      .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(preview["invoice_number"], "INV/2024/06/002");

    let req = TestRequest::get()
      .uri(&format!("/api/v1/invoices/{}", invoice_id))
      .insert_header(bearer(&token))
      .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["seller"]["name"], "Jane Doe Studio");
    assert_eq!(details["items"][0]["total_price"], "246.00");

    let req = TestRequest::get()
      .uri("/api/v1/invoices?search=acme&year=2024&month=6")
      .insert_header(bearer(&token))
      .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Business with invoices cannot be deleted
    let req = TestRequest::delete()
      .uri(&format!("/api/v1/businesses/{}", business_id))
      .insert_header(bearer(&token))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = TestRequest::get()
      .uri("/api/v1/dashboard")
      .insert_header(bearer(&token))
      .to_request();
    let dashboard: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(dashboard["has_active_business"], true);
    assert_eq!(dashboard["monthly"]["limit"], "8000.00");

    let req = TestRequest::delete()
      .uri(&format!("/api/v1/invoices/{}", invoice_id))
      .insert_header(bearer(&token))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
      .uri(&format!("/api/v1/invoices/{}", invoice_id))
      .insert_header(bearer(&token))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[actix_web::test]
  async fn test_invoice_validation_errors() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    let token = register!(&app, "owner@example.com");

    let mut body = invoice_body("2024-06-15");
    body["items"] = json!([]);
    let req = TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&token))
      .set_json(body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "validation_error");
    assert_eq!(
      error["message"],
      "items: At least one line item is required"
    );
  }

  #[actix_web::test]
  async fn test_malformed_input_uses_error_envelope() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    let token = register!(&app, "owner@example.com");

    let mut bad_price = invoice_body("2024-06-15");
    bad_price["items"][0]["unit_price"] = json!("ten");
    let requests = vec![
      TestRequest::post()
        .uri("/api/v1/invoices")
        .insert_header(bearer(&token))
        .set_json(invoice_body("2024-13-45"))
        .to_request(),
      TestRequest::post()
        .uri("/api/v1/invoices")
        .insert_header(bearer(&token))
        .set_json(bad_price)
        .to_request(),
      TestRequest::get()
        .uri("/api/v1/invoices?year=last")
        .insert_header(bearer(&token))
        .to_request(),
      TestRequest::get()
        .uri("/api/v1/invoices/abc")
        .insert_header(bearer(&token))
        .to_request(),
      TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request(),
    ];

    for req in requests {
      let uri = req.path().to_string();
      let resp = test::call_service(&app, req).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
      let body: Value = test::read_body_json(resp).await;
      assert_eq!(body["error"], "validation_error", "{uri}");
      assert!(!body["message"].as_str().unwrap().is_empty(), "{uri}");
    }
  }

  #[actix_web::test]
  async fn test_fetched_invoice_resubmits_unchanged() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    let token = register!(&app, "owner@example.com");

    let req = TestRequest::post()
      .uri("/api/v1/businesses")
      .insert_header(bearer(&token))
      .set_json(business_body())
      .to_request();
    let business: Value = test::call_and_read_body_json(&app, req).await;
    let req = TestRequest::put()
      .uri(&format!("/api/v1/businesses/{}/activate", business["id"]))
      .insert_header(bearer(&token))
      .to_request();
    test::call_service(&app, req).await;

    let mut body = invoice_body("2024-06-15");
    body["items"] = json!([
      { "name": "Bolts", "quantity": "1000", "unit_price": "0.0149", "tax_rate": "0" }
    ]);
    let req = TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&token))
      .set_json(body)
      .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["total_amount"], "14.90");

    let req = TestRequest::get()
      .uri(&format!("/api/v1/invoices/{}", created["id"]))
      .insert_header(bearer(&token))
      .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["items"][0]["unit_price"], "0.0149");

    let item = &fetched["items"][0];
    let resubmitted = json!({
      "issue_date": fetched["issue_date"],
      "buyer_name": fetched["buyer"]["name"],
      "buyer_address": fetched["buyer"]["address"],
      "notes": "Paid in full",
      "items": [{
        "name": item["name"],
        "quantity": item["quantity"],
        "unit_price": item["unit_price"],
        "tax_rate": item["tax_rate"]
      }]
    });
    let req = TestRequest::put()
      .uri(&format!("/api/v1/invoices/{}", created["id"]))
      .insert_header(bearer(&token))
      .set_json(resubmitted)
      .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["total_amount"], "14.90");
    assert_eq!(updated["items"][0]["unit_price"], "0.0149");
  }

  #[actix_web::test]
  async fn test_foreign_invoice_is_forbidden() {
    let store = Arc::new(InMemoryStore::new());
    let deps = dependencies(&store);
    let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;
    let owner = register!(&app, "owner@example.com");
    let intruder = register!(&app, "intruder@example.com");

    let req = TestRequest::post()
      .uri("/api/v1/businesses")
      .insert_header(bearer(&owner))
      .set_json(business_body())
      .to_request();
    let business: Value = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::put()
      .uri(&format!("/api/v1/businesses/{}/activate", business["id"]))
      .insert_header(bearer(&owner))
      .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::post()
      .uri("/api/v1/invoices")
      .insert_header(bearer(&owner))
      .set_json(invoice_body("2024-06-15"))
      .to_request();
    let invoice: Value = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::get()
      .uri(&format!("/api/v1/invoices/{}", invoice["id"]))
      .insert_header(bearer(&intruder))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::get()
      .uri(&format!("/api/v1/businesses/{}", business["id"]))
      .insert_header(bearer(&intruder))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
