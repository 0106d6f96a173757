//! # Passkey Registration
//!
//! Creates a platform credential for a username and records it in the local
//! registry. A second registration for the same username replaces the first
//! record.

use crate::ceremony::options::registration_options;
use crate::ceremony::{bounded, ensure_platform_support, finish, require_username, AuthOutcome};
use crate::error::AppResult;
use crate::platform::PlatformError;
use crate::registry::CredentialRecord;
use crate::state::AppState;

/// Register a passkey whose display name is the username.
pub async fn register_passkey(state: &AppState, username: &str) -> AuthOutcome {
    register_passkey_with_display_name(state, username, username).await
}

/// Register a passkey for `username`
///
/// ## Flow
/// 1. Reject a blank username (`InvalidInput`)
/// 2. Check WebAuthn support (`UnsupportedPlatform`)
/// 3. Build creation options: fresh challenge, fresh user handle, ES256 then RS256
/// 4. Ask the platform to create the credential, for at most 60 seconds
/// 5. Upsert the record under `passkey_<username>`
///
/// Never fails: every error becomes a failed `AuthOutcome`.
pub async fn register_passkey_with_display_name(
    state: &AppState,
    username: &str,
    display_name: &str,
) -> AuthOutcome {
    tracing::debug!(%username, "Starting passkey registration");
    let result = register(state, username, display_name).await;
    finish("registration", username, result)
}

async fn register(state: &AppState, username: &str, display_name: &str) -> AppResult<String> {
    require_username(username, "Please enter a username first to register a Passkey.")?;
    ensure_platform_support(state).await?;

    let options = registration_options(&state.relying_party, username, display_name);

    let credential = bounded(state.platform.create_credential(&options), options.timeout).await?;
    if credential.id.is_empty() {
        return Err(PlatformError::Other(
            "The authenticator returned a credential without an id.".to_string(),
        )
        .into());
    }
    tracing::debug!(
        %username,
        algorithm = credential.algorithm.id(),
        "Platform created credential"
    );

    let record = CredentialRecord::new(username.to_string(), credential.id, credential.public_key);
    state.registry.put(&record).await?;

    Ok(format!("Passkey registered successfully for {username}!"))
}
