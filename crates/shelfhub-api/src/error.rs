//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use shelfhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    pub details: Option<serde_json::Value>,
}

/// Handler-facing error. Wraps `AppError` so it can be turned into a
/// response at the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// HTTP status for the wrapped error kind.
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind)
    }

    /// The message safe to show a client. Server-side failures are reduced
    /// to a generic message.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.0.message.clone()
        }
    }

    /// Builds the JSON body, logging server-side failures.
    pub fn body(&self) -> ApiErrorResponse {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0, "Internal server error");
        }
        ApiErrorResponse {
            error: if status.is_server_error() {
                ErrorKind::Internal.to_string()
            } else {
                self.0.kind.to_string()
            },
            message: self.public_message(),
            details: None,
        }
    }
}

/// Maps an error kind onto its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Authentication
        | ErrorKind::MissingCredential
        | ErrorKind::InvalidToken
        | ErrorKind::Session => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
