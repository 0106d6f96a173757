use crate::ceremony::types::{AuthOutcome, AuthenticateRequest, PasswordRequest, RegisterRequest};
use crate::ceremony::{self, authentication, registration};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

// Passkey ceremonies. These always answer 200 with an `AuthOutcome`;
// failures travel in `errorMessage`.

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Json<AuthOutcome> {
    let display_name = req.display_name.as_deref().unwrap_or(&req.username);
    let outcome =
        registration::register_passkey_with_display_name(&state, &req.username, display_name).await;

    Json(outcome)
}

pub async fn authenticate(
    State(state): State<AppState>,
    Json(req): Json<AuthenticateRequest>,
) -> Json<AuthOutcome> {
    Json(authentication::authenticate_passkey(&state, &req.username).await)
}

pub async fn password(
    State(state): State<AppState>,
    Json(req): Json<PasswordRequest>,
) -> Json<AuthOutcome> {
    Json(authentication::authenticate_with_password(&state, &req.username, &req.password).await)
}

// Session

pub async fn logout(State(state): State<AppState>) -> Json<Value> {
    ceremony::logout(&state);

    Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
}

pub async fn session_info(State(state): State<AppState>) -> Json<Value> {
    match state.session.current_user() {
        Some(username) => Json(json!({
            "authenticated": true,
            "currentUser": username
        })),
        None => Json(json!({
            "authenticated": false
        })),
    }
}
