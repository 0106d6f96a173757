//! # Sign-in and Sign-out
//!
//! Passkey authentication against the credential stored for a username,
//! the demo password path, and logout. All three update the session owned by
//! [`AppState`] and notify its subscribers.

use crate::ceremony::options::authentication_options;
use crate::ceremony::{bounded, ensure_platform_support, finish, require_username, AuthOutcome};
use crate::error::{AppError, AppResult};
use crate::platform::PlatformError;
use crate::state::AppState;

/// Sign in as `username` with the passkey registered for it
///
/// ## Flow
/// 1. Reject a blank username (`InvalidInput`)
/// 2. Check WebAuthn support (`UnsupportedPlatform`)
/// 3. Load the stored record (`NoCredentialFound` if there is none)
/// 4. Ask the platform for an assertion limited to the stored credential id
/// 5. On any assertion: sign the user in and notify
///
/// The assertion is not verified against the stored public key.
pub async fn authenticate_passkey(state: &AppState, username: &str) -> AuthOutcome {
    tracing::debug!(%username, "Starting passkey authentication");
    let result = authenticate(state, username).await;
    finish("authentication", username, result)
}

async fn authenticate(state: &AppState, username: &str) -> AppResult<String> {
    require_username(username, "Please enter a username to authenticate with Passkey.")?;
    ensure_platform_support(state).await?;

    let record = state.registry.get(username).await?.ok_or_else(|| {
        AppError::NoCredentialFound(
            "No passkey found for this username. Please register a passkey first.".to_string(),
        )
    })?;
    if record.is_legacy() {
        tracing::debug!(%username, version = record.schema_version, "Using legacy passkey record");
    }

    let options = authentication_options(&state.relying_party, &record.credential_id);

    let assertion = bounded(state.platform.get_assertion(&options), options.timeout)
        .await?
        .ok_or(PlatformError::NoResult)?;
    tracing::debug!(
        %username,
        credential_id = %assertion.credential_id,
        "Assertion received (signature not verified)"
    );

    state.session.sign_in(username);

    Ok(format!("Successfully authenticated as {username}!"))
}

/// Demo password sign-in: any non-blank pair is accepted after a fixed delay.
pub async fn authenticate_with_password(
    state: &AppState,
    username: &str,
    password: &str,
) -> AuthOutcome {
    tokio::time::sleep(state.password_delay).await;

    let result = if username.trim().is_empty() || password.trim().is_empty() {
        Err(AppError::InvalidInput(
            "Please enter both username and password.".to_string(),
        ))
    } else {
        state.session.sign_in(username);
        Ok(format!("Welcome back, {username}!"))
    };

    finish("password", username, result)
}

/// Clear the current user and notify subscribers with an empty name.
pub fn logout(state: &AppState) {
    state.session.sign_out();
    tracing::info!("Signed out");
}
