//! # Router
//!
//! Wires handlers, middleware and shared state into the Axum application.

use crate::handlers::{auth, health::health_check, passkeys, users::get_current_user};
use crate::middleware;
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// ## Routes
/// - `GET /health`
/// - `POST /api/auth/register`, `/api/auth/authenticate`, `/api/auth/password`
/// - `POST /api/auth/logout`, `GET /api/auth/session`
/// - `GET /api/passkeys`, `DELETE /api/passkeys/{username}`
/// - `GET /api/users/me` (signed-in users only)
///
/// Anything else is served from the `static` directory.
pub fn router(state: AppState) -> Router {
    // CORS is wide open for the demo; restrict origins in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        // Passkey ceremonies and the password path
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/authenticate", post(auth::authenticate))
        .route("/api/auth/password", post(auth::password))
        // Session management
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session_info))
        // Local credential registry
        .route("/api/passkeys", get(passkeys::list_passkeys))
        .route("/api/passkeys/{username}", delete(passkeys::delete_passkey))
        .merge(protected_routes)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
