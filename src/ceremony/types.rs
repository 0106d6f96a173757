//! # Ceremony API Types
//!
//! The normalized result every ceremony returns, and the JSON request bodies
//! the HTTP surface accepts.

use serde::{Deserialize, Serialize};

/// Result of one sign-in attempt.
///
/// Exactly one of `message` / `error_message` is set, depending on
/// `succeeded`. Both are prose meant to be shown to the user as-is.
///
/// ## Example JSON
/// ```json
/// { "succeeded": false, "errorMessage": "No passkey found for this username. ..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AuthOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: Some(message.into()),
            error_message: None,
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: None,
            error_message: Some(error_message.into()),
        }
    }

    /// Whichever of the two messages is set.
    pub fn text(&self) -> &str {
        if self.succeeded {
            self.message.as_deref().unwrap_or_default()
        } else {
            self.error_message.as_deref().unwrap_or_default()
        }
    }
}

/// Request to register a passkey
///
/// ## Example JSON
/// ```json
/// { "username": "alice", "displayName": "Alice Smith" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    /// Shown by the platform prompt; defaults to the username
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request to sign in with a passkey
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
}

/// Request to sign in with a password
#[derive(Debug, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub username: String,
    pub password: String,
}
