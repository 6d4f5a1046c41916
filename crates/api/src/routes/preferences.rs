//! Route definitions for per-user preferences.

use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Preference routes mounted at `/users/{user_id}/preferences`.
///
/// ```text
/// GET / -> get_preferences
/// PUT / -> update_preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(preferences::get_preferences).put(preferences::update_preferences),
    )
}
