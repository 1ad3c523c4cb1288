use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::utils::state::AppState;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Gates uploads behind the shared secret. The comparison is an exact
/// byte match against the configured token; failure rejects the request
/// before any handler or filesystem code runs. A no-op when the
/// deployment disabled auth.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    if state.config.auth_enabled {
        let token = req
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .and_then(|header| header.to_str().ok());
        if token != Some(state.config.auth_token.as_str()) {
            return Err(AppError::Unauthorized);
        }
    }
    Ok(next.run(req).await)
}
