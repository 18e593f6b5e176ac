// service/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};
use catalog::CatalogError;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{product_handlers, rating_handlers};

async fn index_handler(app_state: web::Data<AppState>) -> HttpResponse {
  info!("Request for Root URL");
  HttpResponse::Ok().json(json!({
    "name": "Product REST API Service",
    "version": "1.0",
    "paths": app_state.url_for("/products"),
  }))
}

/// Liveness check. Reports the process only; the store is not consulted.
async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Requests without `Content-Type: application/json` are 415s; unparseable bodies are
/// reported as malformed input.
fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  match err {
    error::JsonPayloadError::ContentType => {
      let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");
      tracing::error!("Invalid Content-Type: {}", content_type);
      AppError::UnsupportedMediaType("Content-Type must be application/json".to_string()).into()
    }
    error::JsonPayloadError::Deserialize(_) => {
      AppError::from(CatalogError::MalformedInput { found: "invalid JSON" }).into()
    }
    other => other.into(),
  }
}

// Called from `main.rs` and the integration tests to configure the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .route("/", web::get().to(index_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler))
        .route("/{product_id}/rating", web::put().to(rating_handlers::update_rating_handler)),
    );
}
