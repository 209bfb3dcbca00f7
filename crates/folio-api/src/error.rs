//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as
//! `{"timestamp": ..., "status": 400, "error": "INVALID_STATUS", "message": ...}`.
//! Store failures are logged and reported without detail.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::Utc;
use folio_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request could not be decoded (bad JSON, query string or path).
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Lifecycle(#[from] CoreError),
}

impl ApiError {
  /// HTTP status and stable machine-readable code.
  pub fn status_and_code(&self) -> (StatusCode, &'static str) {
    match self {
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
      ApiError::Lifecycle(e) => match e {
        CoreError::InvalidPublication(_) => (StatusCode::BAD_REQUEST, "INVALID_PUBLICATION"),
        CoreError::InvalidStatus(_) => (StatusCode::BAD_REQUEST, "INVALID_STATUS"),
        CoreError::InvalidTransition { .. } => {
          (StatusCode::BAD_REQUEST, "INVALID_STATE_TRANSITION")
        }
        CoreError::AuthorNotFound { .. } => (StatusCode::BAD_REQUEST, "AUTHOR_NOT_FOUND"),
        CoreError::PublicationNotFound(_) => (StatusCode::NOT_FOUND, "PUBLICATION_NOT_FOUND"),
        CoreError::ConcurrentModification(_) => (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION"),
        CoreError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = self.status_and_code();
    let message = match &self {
      ApiError::Lifecycle(CoreError::Store(e)) => {
        error!(error = %e, "unhandled store error");
        "internal server error".to_owned()
      }
      other => other.to_string(),
    };
    let body = json!({
      "timestamp": Utc::now(),
      "status":    status.as_u16(),
      "error":     code,
      "message":   message,
    });
    (status, Json(body)).into_response()
  }
}
