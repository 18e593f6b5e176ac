// service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog::{CatalogError, ErrorKind};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Catalog(#[from] CatalogError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("{0}")]
  UnsupportedMediaType(String),
}

impl AppError {
  /// Short machine-readable label used as the `error` field of response bodies.
  pub fn label(&self) -> &'static str {
    match self {
      AppError::Catalog(err) => err.kind().as_str(),
      AppError::Config(_) => "configuration",
      AppError::Sqlx(_) => "database",
      AppError::UnsupportedMediaType(_) => "unsupported_media_type",
    }
  }
}

impl ResponseError for AppError {
  // Every client-input failure is a 400, including on the rating endpoint.
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Catalog(err) => match err.kind() {
        kind if kind.is_validation() => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::RatingConflict => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      AppError::Config(_) | AppError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let message = if status.is_server_error() {
      // Log the full error, but keep driver details out of the response.
      tracing::error!(application_error = %self, "Responding with error");
      match self {
        AppError::Catalog(CatalogError::MissingIdentifier) => self.to_string(),
        _ => "An internal error occurred".to_string(),
      }
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
      self.to_string()
    };
    let mut body = json!({
      "status": status.as_u16(),
      "error": self.label(),
      "message": message,
    });
    if let AppError::Catalog(err) = self {
      if let Some(field) = err.field() {
        body["field"] = json!(field);
      }
    }
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
