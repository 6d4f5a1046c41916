#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use focus_api::config::{ServerConfig, YouTubeConfig};
use focus_api::router::build_app_router;
use focus_api::state::AppState;
use focus_core::error::ProviderError;
use focus_core::identity::IdentityClientConfig;
use focus_core::provider::VideoProvider;
use focus_core::router::QueryRouter;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        youtube: YouTubeConfig {
            api_key: Some("test-key".to_string()),
            region_code: "IN".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
        identity: IdentityClientConfig {
            api_key: "fb-key".to_string(),
            auth_domain: "focus-test.firebaseapp.com".to_string(),
            project_id: "focus-test".to_string(),
            ..Default::default()
        },
    }
}

/// Canned provider: fixed responses plus a call counter.
pub struct StubProvider {
    pub search: Result<Value, ProviderError>,
    pub trending: Result<Value, ProviderError>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(
        search: Result<Value, ProviderError>,
        trending: Result<Value, ProviderError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            search,
            trending,
            calls: AtomicUsize::new(0),
        })
    }

    /// A provider returning `n` search results and `n` trending videos.
    pub fn with_results(n: usize) -> Arc<Self> {
        Self::new(Ok(search_payload(n)), Ok(trending_payload(n)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoProvider for StubProvider {
    async fn search(&self, _query: &str) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.search.clone()
    }

    async fn trending(&self, _region_code: &str) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.trending.clone()
    }
}

pub fn search_payload(n: usize) -> Value {
    let items: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": { "kind": "youtube#video", "videoId": format!("s{i}") },
                "snippet": {
                    "title": format!("Search {i}"),
                    "description": "desc",
                    "channelTitle": "Channel",
                    "thumbnails": { "medium": { "url": format!("https://i.ytimg.com/vi/s{i}/mqdefault.jpg") } }
                }
            })
        })
        .collect();
    json!({ "kind": "youtube#searchListResponse", "items": items })
}

pub fn trending_payload(n: usize) -> Value {
    let items: Vec<Value> = (0..n)
        .map(|i| json!({ "id": format!("t{i}"), "snippet": { "title": format!("Trending {i}") } }))
        .collect();
    json!({ "kind": "youtube#videoListResponse", "items": items })
}

/// Build the full application router with all middleware layers, using the
/// given database pool and provider (`None` means "not configured").
///
/// Uses the same `build_app_router` as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: SqlitePool, provider: Option<Arc<dyn VideoProvider>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        query_router: Arc::new(QueryRouter::new(provider, "IN")),
    };
    build_app_router(state, &config)
}

/// Shorthand for an app backed by a stub provider.
pub fn build_app_with(pool: SqlitePool, provider: &Arc<StubProvider>) -> Router {
    build_test_app(pool, Some(provider.clone() as Arc<dyn VideoProvider>))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
