//! Request error taxonomy and its HTTP mapping.

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
  /// Client-caused: malformed body, missing field, unknown event type.
  #[error("validation: {detail}")]
  Validation { status: StatusCode, detail: String },

  /// System-caused: the insert did not happen.
  #[error("storage: {0}")]
  Storage(#[from] StoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Validation { status, .. } => *status,
      Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Validation {
      status: rejection.status(),
      detail: rejection.body_text(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let detail = match &self {
      Self::Validation { detail, .. } => {
        warn!(status = status.as_u16(), "event rejected: {}", detail);
        detail.clone()
      }
      Self::Storage(e) => {
        error!("event not stored: {}", e);
        "internal server error".to_string()
      }
    };

    (status, Json(ErrorBody { detail })).into_response()
  }
}
