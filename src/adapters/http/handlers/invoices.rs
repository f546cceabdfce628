use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::get_user;
use crate::adapters::http::{
  dtos::{InvoiceListQuery, InvoiceRequest, NextNumberQuery, SuccessResponse},
  errors::ApiError,
};
use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesCommand,
  ListInvoicesUseCase, PreviewInvoiceNumberUseCase, UpdateInvoiceUseCase,
};

/// GET /api/v1/invoices?search=&year=&month=
///
/// Invoices of the active business; an empty list when none is active.
pub async fn list_invoices_handler(
  req: HttpRequest,
  query: web::Query<InvoiceListQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  query.validate()?;
  let query = query.into_inner();

  let invoices = use_case
    .execute(ListInvoicesCommand {
      user_id: user.id,
      search: query.search,
      year: query.year,
      month: query.month,
    })
    .await?;

  Ok(HttpResponse::Ok().json(invoices))
}

/// POST /api/v1/invoices
pub async fn create_invoice_handler(
  req: HttpRequest,
  body: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  body.validate()?;

  let invoice = use_case
    .execute(body.into_inner().into_command(user.id))
    .await?;
  Ok(HttpResponse::Created().json(invoice))
}

/// GET /api/v1/invoices/next-number?issue_date=YYYY-MM-DD
pub async fn next_invoice_number_handler(
  req: HttpRequest,
  query: web::Query<NextNumberQuery>,
  use_case: web::Data<Arc<PreviewInvoiceNumberUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let issue_date = query
    .issue_date
    .unwrap_or_else(|| Utc::now().date_naive());

  let preview = use_case.execute(user.id, issue_date).await?;
  Ok(HttpResponse::Ok().json(preview))
}

/// GET /api/v1/invoices/{id}
///
/// Includes items and the seller identity for the printable view.
pub async fn get_invoice_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let invoice = use_case.execute(user.id, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(invoice))
}

/// PUT /api/v1/invoices/{id}
pub async fn update_invoice_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  body: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  body.validate()?;

  let invoice = use_case
    .execute(path.into_inner(), body.into_inner().into_command(user.id))
    .await?;
  Ok(HttpResponse::Ok().json(invoice))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete_invoice_handler(
  req: HttpRequest,
  path: web::Path<i64>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Invoice deleted".to_string(),
  }))
}
