use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::ErrorKind;
use crate::domain::auth::AuthError;
use crate::domain::business::BusinessError;
use crate::domain::invoice::InvoiceError;
use crate::domain::revenue::RevenueError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Malformed or out-of-range input (400)
  Validation {
    message: String,
    details: Vec<String>,
  },

  /// Missing or unknown resource (404)
  NotFound(String),

  /// Resource owned by another user (403)
  Forbidden(String),

  /// Operation needs an active business and the user has none (400)
  NoActiveBusiness(String),

  /// State conflict such as a duplicate email (409)
  Conflict(String),

  /// Missing, invalid or expired session (401)
  Unauthorized(String),

  /// Anything the client cannot fix (500)
  Internal(String),
}

impl ApiError {
  pub fn validation(message: impl Into<String>) -> Self {
    ApiError::Validation {
      message: message.into(),
      details: Vec::new(),
    }
  }

  /// Builds the variant for a domain error kind, carrying the error's own message
  pub fn from_kind(kind: ErrorKind, message: String) -> Self {
    match kind {
      ErrorKind::Validation => ApiError::validation(message),
      ErrorKind::NotFound => ApiError::NotFound(message),
      ErrorKind::Forbidden => ApiError::Forbidden(message),
      ErrorKind::NoActiveBusiness => ApiError::NoActiveBusiness(message),
      ErrorKind::Conflict => ApiError::Conflict(message),
      ErrorKind::Unauthorized => ApiError::Unauthorized(message),
      ErrorKind::Internal => ApiError::Internal(message),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ApiError::Validation { .. } => ErrorKind::Validation,
      ApiError::NotFound(_) => ErrorKind::NotFound,
      ApiError::Forbidden(_) => ErrorKind::Forbidden,
      ApiError::NoActiveBusiness(_) => ErrorKind::NoActiveBusiness,
      ApiError::Conflict(_) => ErrorKind::Conflict,
      ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
      ApiError::Internal(_) => ErrorKind::Internal,
    }
  }

  fn message(&self) -> &str {
    match self {
      ApiError::Validation { message, .. }
      | ApiError::NotFound(message)
      | ApiError::Forbidden(message)
      | ApiError::NoActiveBusiness(message)
      | ApiError::Conflict(message)
      | ApiError::Unauthorized(message)
      | ApiError::Internal(message) => message,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.kind().as_str(), self.message())
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self.kind() {
      ErrorKind::Validation | ErrorKind::NoActiveBusiness => StatusCode::BAD_REQUEST,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Forbidden => StatusCode::FORBIDDEN,
      ErrorKind::Conflict => StatusCode::CONFLICT,
      ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (message, details) = match self {
      ApiError::Internal(msg) => {
        // Never expose internals to the client
        tracing::error!("Internal error: {}", msg);
        ("An internal server error occurred".to_string(), None)
      }
      ApiError::Validation { message, details } if !details.is_empty() => {
        (message.clone(), Some(serde_json::json!(details)))
      }
      other => (other.message().to_string(), None),
    };

    let body = ErrorResponse {
      error: self.kind().as_str().to_string(),
      message,
      details,
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(body)
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    ApiError::from_kind(error.kind(), error.to_string())
  }
}

impl From<BusinessError> for ApiError {
  fn from(error: BusinessError) -> Self {
    ApiError::from_kind(error.kind(), error.to_string())
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    ApiError::from_kind(error.kind(), error.to_string())
  }
}

impl From<RevenueError> for ApiError {
  fn from(error: RevenueError) -> Self {
    ApiError::from_kind(error.kind(), error.to_string())
  }
}

/// Convert validation errors from validator crate
///
/// Nested item errors are reported with their path, e.g. `items[1].name`.
/// The first message (in path order) becomes the headline.
impl From<ValidationErrors> for ApiError {
  fn from(errors: ValidationErrors) -> Self {
    let mut messages = Vec::new();
    collect_messages(&errors, "", &mut messages);
    messages.sort();

    let message = messages
      .first()
      .cloned()
      .unwrap_or_else(|| "Invalid request".to_string());

    ApiError::Validation {
      message,
      details: messages,
    }
  }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
  for (field, kind) in errors.errors() {
    let path = if prefix.is_empty() {
      field.to_string()
    } else {
      format!("{}.{}", prefix, field)
    };

    match kind {
      ValidationErrorsKind::Field(field_errors) => {
        for error in field_errors {
          let text = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", path));
          out.push(format!("{}: {}", path, text));
        }
      }
      ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
      ValidationErrorsKind::List(items) => {
        for (index, inner) in items {
          collect_messages(inner, &format!("{}[{}]", path, index), out);
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::business::ValidationError;
  use actix_web::body::to_bytes;

  async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_web::test]
  async fn test_not_found_maps_to_404() {
    let (status, body) = body_json(InvoiceError::NotFound.into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
  }

  #[actix_web::test]
  async fn test_forbidden_maps_to_403() {
    let (status, body) = body_json(InvoiceError::Forbidden.into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
  }

  #[actix_web::test]
  async fn test_no_active_business_maps_to_400() {
    let (status, body) = body_json(BusinessError::NoActiveBusiness.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no_active_business");
  }

  #[actix_web::test]
  async fn test_business_with_invoices_is_conflict() {
    let (status, body) = body_json(BusinessError::HasInvoices(3).into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
  }

  #[actix_web::test]
  async fn test_domain_validation_message_is_kept() {
    let error = BusinessError::Validation(ValidationError::Required {
      field: "seller_name",
    });
    let (status, body) = body_json(error.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "seller_name is required");
    assert!(body.get("details").is_none());
  }

  #[actix_web::test]
  async fn test_internal_error_hides_details() {
    let (status, body) = body_json(ApiError::Internal("pool timed out".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "An internal server error occurred");
  }

  #[actix_web::test]
  async fn test_invalid_credentials_maps_to_401() {
    let (status, body) = body_json(AuthError::InvalidCredentials.into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
  }
}
