use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::ApiError,
  application::auth::{GetCurrentUserResponse, GetCurrentUserUseCase},
};

/// The caller resolved from the bearer token, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub id: i64,
  pub email: String,
  pub name: String,
}

impl From<GetCurrentUserResponse> for AuthenticatedUser {
  fn from(user: GetCurrentUserResponse) -> Self {
    Self {
      id: user.id,
      email: user.email,
      name: user.name,
    }
  }
}

/// Authentication middleware that validates session tokens and attaches the user to the request
///
/// Requests without a valid `Authorization: Bearer <token>` header are
/// answered with 401 before reaching the wrapped service.
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use invoicedesk::application::auth::GetCurrentUserUseCase;
/// # use invoicedesk::adapters::http::middleware::auth::AuthMiddleware;
///
/// # async fn example(get_user_use_case: Arc<GetCurrentUserUseCase>) {
/// let app = App::new().service(
///   web::scope("/api/v1/invoices")
///     .wrap(AuthMiddleware::new(get_user_use_case))
///     .route("", web::get().to(|| async { "protected" })),
/// );
/// # }
/// ```
pub struct AuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthMiddleware {
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let get_user_use_case = self.get_user_use_case.clone();

    Box::pin(async move {
      let user = match extract_session_token(&req) {
        Ok(token) => get_user_use_case
          .execute(token)
          .await
          .map(AuthenticatedUser::from)
          .map_err(ApiError::from),
        Err(e) => Err(e),
      };

      let user = match user {
        Ok(user) => user,
        Err(e) => {
          tracing::debug!(path = %req.path(), "rejected unauthenticated request");
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract session token from Authorization header
pub(crate) fn extract_session_token<R: HttpMessage>(req: &R) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::Unauthorized("Missing or invalid authorization token".to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::services::test_support::auth_service;
  use crate::infrastructure::persistence::memory::InMemoryStore;
  use actix_web::{
    App, HttpRequest, HttpResponse,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };

  #[test]
  fn test_extract_session_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    assert_eq!(extract_session_token(&req).unwrap(), "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_srv_request();
    assert!(extract_session_token(&req).is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    assert!(extract_session_token(&req).is_err());
  }

  async fn whoami(req: HttpRequest) -> HttpResponse {
    let user = req.extensions().get::<AuthenticatedUser>().cloned();
    match user {
      Some(user) => HttpResponse::Ok().body(user.email),
      None => HttpResponse::InternalServerError().finish(),
    }
  }

  #[actix_web::test]
  async fn test_middleware_attaches_user() {
    let store = Arc::new(InMemoryStore::new());
    let auth = Arc::new(auth_service(&store));
    let (_, _, token) = auth
      .register("owner@example.com", "password123", "Owner")
      .await
      .unwrap();

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(GetCurrentUserUseCase::new(
          auth,
        ))))
        .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/me")
      .insert_header(("Authorization", format!("Bearer {}", token.as_str())))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(body, "owner@example.com");
  }

  #[actix_web::test]
  async fn test_middleware_rejects_unknown_token() {
    let store = Arc::new(InMemoryStore::new());
    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(GetCurrentUserUseCase::new(
          Arc::new(auth_service(&store)),
        ))))
        .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/me")
      .insert_header(("Authorization", format!("Bearer {}", "ab".repeat(32))))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get().uri("/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
