//! Route definitions for the results feed.

use axum::routing::post;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Feed routes mounted at `/feed`.
///
/// ```text
/// POST / -> route_feed
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(feed::route_feed))
}
