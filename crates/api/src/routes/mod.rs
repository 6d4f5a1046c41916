pub mod auth;
pub mod feed;
pub mod health;
pub mod preferences;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /feed                                 route a trigger set (POST)
///
/// /users/{user_id}/preferences          get, upsert (GET, PUT)
///
/// /auth/session                         sign-in display state (POST)
/// /auth/config                          sign-in widget configuration (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Search / trending / welcome results.
        .nest("/feed", feed::router())
        // Per-user dark mode flag and search history.
        .nest("/users/{user_id}/preferences", preferences::router())
        // Sign-in widget glue.
        .nest("/auth", auth::router())
}
