//! HTTP mapping for [`AppError`], enabled by the `axum` feature.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::MissingRequiredField | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::StorageBackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::InvariantViolation
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);

        let message = match self.kind {
            ErrorKind::Database | ErrorKind::Internal | ErrorKind::Configuration => {
                tracing::error!(kind = %self.kind, error = %self.message, source = ?self.source, "Internal server error");
                "Server error".to_string()
            }
            ErrorKind::InvariantViolation | ErrorKind::StorageBackendUnavailable => {
                tracing::error!(kind = %self.kind, error = %self.message, "Request failed");
                self.message
            }
            _ => self.message,
        };

        let body = ApiErrorResponse {
            success: false,
            error: self.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
