//! Error type system for SmartGov
//!
//! This module provides the server-side error type with:
//! - HTTP status code mapping
//! - Error type names for API responses
//! - The request's trace ID on every error body

use crate::api::middleware::current_trace_id;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the SmartGov mock service
#[derive(Debug, thiserror::Error)]
pub enum GovError {
    // Request errors
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    UnauthenticatedError(String),

    // Token issuance
    #[error("Token error: {0}")]
    TokenError(String),
}

impl GovError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GovError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GovError::UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            GovError::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            GovError::ValidationError(_) => "ValidationError",
            GovError::UnauthenticatedError(_) => "UnauthenticatedError",
            GovError::TokenError(_) => "TokenError",
        }
    }

    /// Whether the failure was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error body returned by every failing endpoint.
///
/// `error` carries the human-readable message the client shows inline;
/// `code` names the error type. `trace_id` matches the `X-Trace-Id` header.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

impl ErrorResponse {
    /// Build the body for `error`, tagged with the current request's trace ID
    pub fn from_error(error: &GovError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_type().to_string(),
            // Only unset when a handler runs without the trace middleware
            trace_id: current_trace_id().unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for GovError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        if self.is_client_error() {
            tracing::warn!(
                error_type = self.error_type(),
                status_code = %status_code,
                "Request rejected: {}",
                self
            );
        } else {
            tracing::error!(
                error_type = self.error_type(),
                status_code = %status_code,
                "Request failed: {}",
                self
            );
        }

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with GovError
pub type Result<T> = std::result::Result<T, GovError>;
