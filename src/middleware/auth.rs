use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Reject requests while nobody is signed in.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.session.is_authenticated() {
        Ok(next.run(request).await)
    } else {
        Err(AppError::Unauthorized("Not authenticated".to_string()))
    }
}
