//! Handlers for per-user preferences (dark mode flag, search history).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use focus_core::preferences::{validate_search_query, validate_user_id, PreferenceUpdate};
use focus_db::repositories::PreferenceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/{user_id}/preferences
///
/// Returns 204 if the user has never saved anything.
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_user_id(&user_id)?;
    let pref = PreferenceRepo::get(&state.pool, &user_id).await?;

    match pref {
        Some(p) => Ok(Json(DataResponse { data: p }).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// PUT /api/v1/users/{user_id}/preferences
///
/// Create or update the user's preferences. Absent fields are preserved.
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<PreferenceUpdate>,
) -> AppResult<impl IntoResponse> {
    validate_user_id(&user_id)?;
    if let Some(query) = &input.search_query {
        validate_search_query(query)?;
    }

    let pref = PreferenceRepo::upsert(&state.pool, &user_id, &input).await?;

    tracing::info!(
        user_id = %user_id,
        dark_mode = pref.dark_mode,
        history_len = pref.search_history.len(),
        "User preferences updated",
    );

    Ok(Json(DataResponse { data: pref }))
}
