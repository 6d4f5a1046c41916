use std::sync::Arc;

use focus_core::provider::VideoProvider;
use focus_core::router::QueryRouter;
use focus_youtube::YouTubeApi;

use crate::config::{ServerConfig, YouTubeConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Preference store connection pool.
    pub pool: focus_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves feed triggers into provider calls.
    pub query_router: Arc<QueryRouter>,
}

impl AppState {
    /// Assemble state, wiring the YouTube client when an API key is configured.
    pub fn new(pool: focus_db::DbPool, config: ServerConfig) -> Self {
        let query_router = build_query_router(&config.youtube);
        Self {
            pool,
            config: Arc::new(config),
            query_router: Arc::new(query_router),
        }
    }
}

/// Build the query router for the configured provider.
///
/// Without an API key the router has no provider and every search or
/// trending request reports "not configured".
pub fn build_query_router(config: &YouTubeConfig) -> QueryRouter {
    let provider = config.api_key.as_ref().map(|key| {
        Arc::new(YouTubeApi::new(key.clone(), config.base_url.clone())) as Arc<dyn VideoProvider>
    });
    if provider.is_none() {
        tracing::warn!("YOUTUBE_API_KEY is not set; search and trending are disabled");
    }
    QueryRouter::new(provider, config.region_code.clone())
}
