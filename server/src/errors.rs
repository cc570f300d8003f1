// storefront_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::{ErrorKind, StorefrontError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error(transparent)]
  Storefront(#[from] StorefrontError),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Stable machine-readable kind sent to clients.
  pub fn kind(&self) -> &'static str {
    match self {
      AppError::Validation(_) => ErrorKind::InvalidArgument.as_str(),
      AppError::Auth(_) => "unauthorized",
      AppError::NotFound(_) => ErrorKind::NotFound.as_str(),
      AppError::Conflict(_) => "conflict",
      AppError::Storefront(e) => e.kind().as_str(),
      AppError::Sqlx(_) => ErrorKind::Unavailable.as_str(),
      AppError::Config(_) | AppError::Internal(_) => "internal",
    }
  }

  /// Client-facing message. Database and configuration details stay in the logs.
  fn public_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Conflict(m) => m.clone(),
      AppError::Storefront(e) => e.to_string(),
      AppError::Sqlx(_) => "Database operation failed".to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Internal(_) => "An internal error occurred".to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::Storefront(e) => match e.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
      },
      AppError::Sqlx(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = ?self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    HttpResponse::build(status).json(json!({
      "kind": self.kind(),
      "message": self.public_message(),
    }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storefront_errors_map_to_distinct_statuses() {
    let not_found = AppError::from(StorefrontError::ProductNotFound {
      product_id: "x".into(),
    });
    assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(not_found.kind(), "not_found");

    let invalid = AppError::from(StorefrontError::invalid("quantity", "must be positive"));
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(invalid.kind(), "invalid_argument");

    let down = AppError::from(StorefrontError::unavailable(
      "write failed",
      std::io::Error::new(std::io::ErrorKind::Other, "connection reset"),
    ));
    assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(!down.public_message().contains("connection reset"));
  }

  #[test]
  fn internal_details_are_not_exposed() {
    let err = AppError::Internal("hash parse failed at byte 3".into());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_message(), "An internal error occurred");
  }
}
