use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type covering every failure the gateway can surface.
///
/// Each variant maps to one HTTP status class and one stable error code so
/// clients can handle failures programmatically without parsing messages.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad client input: missing comment fields, malformed path parameter,
    /// page <= 0. Raised before any network call is made.
    #[error("validation error: {0}")]
    Validation(String),

    /// The moderation service explicitly rejected the content. Distinct from
    /// an upstream fault: the request was well-formed, the content was not.
    #[error("moderation rejected: {0}")]
    ModerationRejected(String),

    /// A collaborator call failed: unreachable, wrong status, or a body the
    /// gateway could not decode.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ModerationRejected(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message (without sensitive details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation error: {}", msg),
            AppError::ModerationRejected(msg) => {
                format!("Comment rejected by moderation: {}", msg)
            }
            AppError::Upstream(_) => "Upstream service error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Get error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ModerationRejected(_) => "MODERATION_REJECTED",
            AppError::Upstream(UpstreamError::Transport { .. }) => "UPSTREAM_TRANSPORT_ERROR",
            AppError::Upstream(UpstreamError::Status { .. }) => "UPSTREAM_STATUS_ERROR",
            AppError::Upstream(UpstreamError::Decode { .. }) => "UPSTREAM_DECODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %code,
                status = %status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %code,
                "Client error occurred"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();
        let error_code = self.error_code();

        // user_message() already redacts upstream/internal detail; client
        // errors carry the concrete reason
        let body = json!({
            "error": self.user_message(),
            "error_code": error_code,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

// ============================================================================
// Helper functions for creating common errors
// ============================================================================

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create a moderation rejection
    pub fn moderation_rejected(msg: impl Into<String>) -> Self {
        AppError::ModerationRejected(msg.into())
    }

    /// Create an internal server error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
