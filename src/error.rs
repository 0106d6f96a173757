//! # Error Handling
//!
//! This module defines the error taxonomy for passkey ceremonies and the
//! HTTP surface around them.
//!
//! Ceremony errors never reach the caller as `Err`: the orchestrator turns
//! them into a failed [`AuthOutcome`](crate::ceremony::types::AuthOutcome)
//! whose `error_message` is the `Display` text of the error. For that reason
//! every ceremony variant renders as prose that can be shown to a user
//! verbatim.
//!
//! Infrastructure errors (database, serialization) that escape the registry
//! management endpoints are converted into JSON HTTP responses.

use crate::platform::PlatformError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown when the platform has no WebAuthn capability.
pub const UNSUPPORTED_PLATFORM_MESSAGE: &str = "Passkeys are not supported in your browser: \
     the WebAuthn API is unavailable. Please use a modern browser like Chrome, Safari, or Edge.";

/// Application-wide error type
///
/// ## The `#[from]` attribute
/// This enables automatic conversion using the `?` operator. For example a
/// `PlatformError` returned by the authenticator becomes
/// `AppError::PlatformCeremonyFailed`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Empty or whitespace-only username/password
    #[error("{0}")]
    InvalidInput(String),

    /// The platform exposes no WebAuthn capability
    #[error("{}", UNSUPPORTED_PLATFORM_MESSAGE)]
    UnsupportedPlatform,

    /// Authentication requested for a username without a stored passkey
    #[error("{0}")]
    NoCredentialFound(String),

    /// The create/get call raised or produced nothing
    ///
    /// Covers user cancellation, timeouts, security errors and "no result".
    /// The platform's own text is shown as-is.
    #[error("{0}")]
    PlatformCeremonyFailed(#[from] PlatformError),

    /// Anything else that went wrong during a ceremony
    ///
    /// Registry failures are logged and replaced by this variant before they
    /// reach an `AuthOutcome`.
    #[error("{0}")]
    Unexpected(String),

    /// Registry storage errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No signed-in user (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Short machine-friendly class name, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::UnsupportedPlatform => "unsupported_platform",
            AppError::NoCredentialFound(_) => "no_credential_found",
            AppError::PlatformCeremonyFailed(_) => "platform_ceremony_failed",
            AppError::Unexpected(_) | AppError::Database(_) | AppError::Serialization(_) => {
                "unexpected"
            }
            AppError::Unauthorized(_) => "unauthorized",
        }
    }
}

/// Convert AppError into an HTTP response
///
/// Only the registry management and profile endpoints return `AppResult`;
/// ceremony endpoints always answer with an `AuthOutcome`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                // Log detailed error for debugging (not shown to user)
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Serialization error".to_string())
            }
            AppError::Unexpected(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::UnsupportedPlatform => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
            AppError::NoCredentialFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::PlatformCeremonyFailed(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
