//! # Ceremony Orchestrator
//!
//! Drives the two WebAuthn ceremonies against the injected platform and
//! turns whatever happens into an [`AuthOutcome`].
//!
//! ## Submodules
//! - `options`: ceremony parameters (challenge, RP, algorithms, policy)
//! - `registration`: creating a passkey and recording it in the registry
//! - `authentication`: signing in with a passkey or a password, and logout
//! - `types`: `AuthOutcome` and request bodies
//!
//! ## Flow Overview
//!
//! ### Registration
//! 1. Reject a blank username
//! 2. Check that the platform supports WebAuthn
//! 3. Build creation options with a fresh challenge and user handle
//! 4. Ask the platform to create a credential
//! 5. Store `{username, credentialId, publicKey, createdAt}` in the registry
//!
//! ### Authentication
//! 1. Reject a blank username
//! 2. Check that the platform supports WebAuthn
//! 3. Look up the stored credential for the username
//! 4. Ask the platform for an assertion over a fresh challenge
//! 5. Mark the user as signed in
//!
//! ## Trust boundary
//! Challenges are minted here and never checked afterwards, and the stored
//! public key is never used to verify the assertion signature. Success means
//! only that the platform returned an assertion.

pub mod authentication;
pub mod options;
pub mod registration;
pub mod types;

pub use authentication::{authenticate_passkey, authenticate_with_password, logout};
pub use registration::{register_passkey, register_passkey_with_display_name};
pub use types::AuthOutcome;

use crate::error::{AppError, AppResult};
use crate::platform::PlatformError;
use crate::state::AppState;
use std::future::Future;
use std::time::Duration;

/// Reject empty and whitespace-only usernames before touching the platform.
pub(crate) fn require_username(username: &str, message: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::InvalidInput(message.to_string()));
    }
    Ok(())
}

pub(crate) async fn ensure_platform_support(state: &AppState) -> AppResult<()> {
    if !state.platform.is_supported().await {
        return Err(AppError::UnsupportedPlatform);
    }
    Ok(())
}

/// Wait for a platform call, giving up after `limit`.
pub(crate) async fn bounded<T, F>(call: F, limit: Duration) -> AppResult<T>
where
    F: Future<Output = Result<T, PlatformError>>,
{
    let result = tokio::time::timeout(limit, call)
        .await
        .map_err(|_| PlatformError::Timeout)?;
    Ok(result?)
}

/// Convert a ceremony result into an outcome, logging the attempt.
pub(crate) fn finish(
    ceremony: &'static str,
    username: &str,
    result: AppResult<String>,
) -> AuthOutcome {
    match result {
        Ok(message) => {
            tracing::info!(ceremony, %username, "Ceremony succeeded");
            AuthOutcome::success(message)
        }
        Err(e) => {
            let e = conceal_storage_failure(ceremony, username, e);
            tracing::warn!(ceremony, %username, kind = e.kind(), error = %e, "Ceremony failed");
            AuthOutcome::failure(e.to_string())
        }
    }
}

/// Registry failures are logged in full and shown to the user as plain prose.
fn conceal_storage_failure(ceremony: &'static str, username: &str, error: AppError) -> AppError {
    match error {
        AppError::Database(_) | AppError::Serialization(_) => {
            tracing::error!(ceremony, %username, error = ?error, "Credential registry failure");
            let action = if ceremony == "registration" {
                "saving"
            } else {
                "reading"
            };
            AppError::Unexpected(format!(
                "Something went wrong while {action} your passkey. Please try again."
            ))
        }
        other => other,
    }
}
