//! API error type.

use axum::{http::StatusCode, response::IntoResponse, Json};
use taskrank_core::CoreError;
use thiserror::Error;

use crate::http::responses::ErrorResponse;

/// Errors returned by the task endpoints.
///
/// Every variant is a client error; the batch is rejected as a whole.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// Batch failed validation or contains a cycle.
    #[error(transparent)]
    Rejected(#[from] CoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
