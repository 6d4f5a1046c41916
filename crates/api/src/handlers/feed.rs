//! Handler for the results feed.
//!
//! One request carries every trigger the client observed (home button,
//! voice transcript, typed text). The query router picks one, makes at most
//! one upstream call, and the outcome is returned as-is. Provider failures
//! are part of the outcome, not HTTP errors.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use focus_core::preferences::{validate_search_query, validate_user_id, PreferenceUpdate};
use focus_core::router::{DisplayItem, ResultsHeader, RouteOutcome, TriggerSet};
use focus_db::repositories::PreferenceRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/feed`.
#[derive(Debug, Deserialize)]
pub struct FeedRequest {
    #[serde(flatten)]
    pub triggers: TriggerSet,
    /// What the query box showed before the trigger fired.
    #[serde(default)]
    pub visible_text: Option<String>,
    /// Signed-in user whose search history should record the query.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response payload for the feed.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub items: Vec<DisplayItem>,
    pub header: ResultsHeader,
    pub header_title: Option<String>,
    pub visible_text: String,
}

impl From<RouteOutcome> for FeedResponse {
    fn from(outcome: RouteOutcome) -> Self {
        Self {
            header_title: outcome.header.title(),
            items: outcome.items,
            header: outcome.header,
            visible_text: outcome.visible_text,
        }
    }
}

/// POST /api/v1/feed
///
/// Resolve the trigger set and return the items, header and visible text.
pub async fn route_feed(
    State(state): State<AppState>,
    Json(input): Json<FeedRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = input
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    if let Some(user_id) = user_id {
        validate_user_id(user_id)?;
    }

    let previous = input.visible_text.as_deref().unwrap_or_default();
    let outcome = state.query_router.route(&input.triggers, previous).await;

    if let (Some(user_id), Some(query)) = (user_id, outcome.resolved_query.as_deref()) {
        record_search(&state, user_id, query).await;
    }

    Ok(Json(DataResponse {
        data: FeedResponse::from(outcome),
    }))
}

/// Append a searched query to the user's history.
///
/// Best-effort: a storage failure is logged and the feed is still served.
async fn record_search(state: &AppState, user_id: &str, query: &str) {
    if let Err(e) = validate_search_query(query) {
        tracing::debug!(user_id = %user_id, error = %e, "Search query not recorded");
        return;
    }
    match PreferenceRepo::upsert(&state.pool, user_id, &PreferenceUpdate::search(query)).await {
        Ok(pref) => tracing::debug!(
            user_id = %user_id,
            history_len = pref.search_history.len(),
            "Search recorded in history",
        ),
        Err(e) => tracing::warn!(
            user_id = %user_id,
            error = %e,
            "Failed to record search history",
        ),
    }
}
