//! # Passkey Management Handlers
//!
//! Listing and deleting entries of the local credential registry.

use crate::error::AppResult;
use crate::registry::CredentialSummary;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

/// List registered passkeys
///
/// ## Route
/// GET /api/passkeys
///
/// ## Response
/// ```json
/// [{ "username": "alice", "createdAt": "2024-01-15T10:30:00Z" }]
/// ```
///
/// Order is unspecified.
pub async fn list_passkeys(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CredentialSummary>>> {
    Ok(Json(state.registry.list().await?))
}

/// Forget the passkey stored for a username
///
/// ## Route
/// DELETE /api/passkeys/{username}
///
/// Deleting a username without a passkey succeeds too.
pub async fn delete_passkey(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Value>> {
    let existed = state.registry.delete(&username).await?;
    tracing::info!(%username, existed, "Passkey deleted");

    Ok(Json(json!({
        "success": true,
        "message": format!("Passkey deleted for {username}")
    })))
}
