//! Handlers for the sign-in widget glue.
//!
//! The widget runs entirely in the browser. The server only interprets the
//! payload it produces and serves the configuration it starts from.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use focus_core::identity::AuthDisplay;
use focus_core::preferences::UserPreference;
use focus_db::repositories::PreferenceRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/auth/session`.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Raw text emitted by the widget (JSON, possibly empty).
    #[serde(default)]
    pub payload: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub auth: AuthDisplay,
    /// Stored preferences for a signed-in user, when available.
    pub preferences: Option<UserPreference>,
}

/// POST /api/v1/auth/session
///
/// Turn the widget payload into a signed-in / signed-out display state.
/// For signed-in users the stored preferences are attached on a
/// best-effort basis.
pub async fn resolve_session(
    State(state): State<AppState>,
    Json(input): Json<SessionRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = AuthDisplay::from_widget_payload(input.payload.as_deref());

    let preferences = match auth.user_id() {
        Some(user_id) => match PreferenceRepo::get(&state.pool, user_id).await {
            Ok(pref) => pref,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to load preferences");
                None
            }
        },
        None => None,
    };

    Ok(Json(DataResponse {
        data: SessionResponse { auth, preferences },
    }))
}

/// GET /api/v1/auth/config
///
/// Web configuration for the browser sign-in widget.
pub async fn client_config(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.config.identity.clone(),
    }))
}
