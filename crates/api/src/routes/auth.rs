//! Route definitions for the sign-in widget glue.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes mounted at `/auth`.
///
/// ```text
/// POST /session -> resolve_session
/// GET  /config  -> client_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::resolve_session))
        .route("/config", get(auth::client_config))
}
