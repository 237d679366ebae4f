//! Error types and response handling for the HTTP server.
//!
//! Every failure is rendered as `{"error": "<message>"}` with a status code
//! derived from the variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::service::ErrorBody;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation
    #[error("{0}")]
    InvalidBody(String),

    /// Request body exceeds the configured size limit
    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    /// No route matches the request
    #[error("Route {method} {path} not found")]
    NotFound { method: String, path: String },

    /// Unexpected failure while handling the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable kind, used in logs
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), error = %self, "Request failed");
        } else {
            tracing::debug!(error_type = self.error_type(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
