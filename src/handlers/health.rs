//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "passkey-ceremony",
///   "webauthn": true
/// }
/// ```
///
/// `webauthn` reports whether the platform authenticator is available.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "passkey-ceremony",
        "webauthn": state.platform.is_supported().await
    }))
}
