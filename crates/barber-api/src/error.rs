//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use barber_core::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  /// Anything the domain did not classify. The detail is logged, never sent.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure: domain rejections keep their message and get
  /// a client-error status, everything else becomes a logged 500.
  pub fn from_store<E: StoreError>(err: E) -> Self {
    if let Some(domain) = err.domain() {
      return Self::from(domain);
    }
    tracing::error!(error = %err, "store failure");
    ApiError::Store(Box::new(err))
  }
}

impl From<&barber_core::Error> for ApiError {
  fn from(err: &barber_core::Error) -> Self {
    use barber_core::Error as E;
    match err {
      E::InvalidInput(_) | E::Duplicate(_) | E::IneligibleStaff(_) | E::SlotConflict { .. } => {
        ApiError::BadRequest(err.to_string())
      }
      E::NotFound(_) => ApiError::NotFound(err.to_string()),
      E::Unauthorized => ApiError::Unauthorized(err.to_string()),
    }
  }
}

impl From<barber_core::Error> for ApiError {
  fn from(err: barber_core::Error) -> Self { Self::from(&err) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn domain_errors_map_to_client_statuses() {
    let cases = [
      (barber_core::Error::invalid("x"), StatusCode::BAD_REQUEST),
      (barber_core::Error::Duplicate("dup".into()), StatusCode::BAD_REQUEST),
      (barber_core::Error::IneligibleStaff(3), StatusCode::BAD_REQUEST),
      (barber_core::Error::NotFound("appointment 1".into()), StatusCode::NOT_FOUND),
      (barber_core::Error::Unauthorized, StatusCode::UNAUTHORIZED),
    ];
    for (err, status) in cases {
      assert_eq!(ApiError::from(err).into_response().status(), status);
    }
  }
}
