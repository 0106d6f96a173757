//! # User Handlers
//!
//! Handlers for the signed-in user.
//! Currently only has an endpoint for the current user's profile.

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Get the current user's profile
///
/// ## Route
/// GET /api/users/me
///
/// ## Authentication
/// Requires a signed-in user (protected by require_auth middleware)
///
/// ## Response
/// ```json
/// {
///   "username": "alice",
///   "hasPasskey": true,
///   "passkeyCreatedAt": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// Password sign-ins have no passkey, so `passkeyCreatedAt` may be null.
pub async fn get_current_user(State(state): State<AppState>) -> AppResult<Json<Value>> {
    // The middleware already checked this, but the session may have changed since
    let username = state
        .session
        .current_user()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let record = state.registry.get(&username).await?;

    // Credential ids and public keys stay out of the response
    Ok(Json(json!({
        "username": username,
        "hasPasskey": record.is_some(),
        "passkeyCreatedAt": record.map(|r| r.created_at)
    })))
}
