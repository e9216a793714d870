//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as
//! `{ "error": ..., "details": ... }`: `400` for validation failures and
//! upstream user errors, `500` for every other upstream failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use product_relay_core::ValidationError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::shopify::UpstreamError;

/// Application-level error type for the relay.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request fields failed validation; no upstream call was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Upstream product creation failed.
    #[error("Shopify error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Request body or query string could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Value,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::BadRequest(_)
            | Self::Upstream(UpstreamError::UserErrors(_)) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(err) => ErrorBody {
                error: err.to_string(),
                details: Value::String(err.details()),
            },
            Self::Upstream(UpstreamError::UserErrors(errors)) => ErrorBody {
                error: "Product validation failed".to_string(),
                details: serde_json::to_value(errors).unwrap_or(Value::Null),
            },
            Self::Upstream(err) => ErrorBody {
                error: "Failed to create product".to_string(),
                details: Value::String(err.to_string()),
            },
            Self::BadRequest(message) => ErrorBody {
                error: "Invalid request".to_string(),
                details: Value::String(message.clone()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Product creation failed"
            );
        } else {
            tracing::warn!(error = %self, "Product request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
