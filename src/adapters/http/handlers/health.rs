use actix_web::HttpResponse;

/// GET /health
pub async fn health_check() -> HttpResponse {
  HttpResponse::Ok().content_type("text/plain").body("OK")
}
