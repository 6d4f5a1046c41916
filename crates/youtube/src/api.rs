//! REST client for the YouTube Data API v3.
//!
//! Wraps the keyword-search and most-popular endpoints using [`reqwest`].
//! Responses are returned as raw JSON; mapping into display cards is done
//! by `focus_core::video`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use focus_core::error::ProviderError;
use focus_core::provider::{
    VideoProvider, MAX_RESULTS, SEARCH_TIMEOUT_SECS, TRENDING_TIMEOUT_SECS,
};
use focus_core::video::decode_payload;
use reqwest::Url;
use serde_json::Value;

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Longest slice of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Errors from the YouTube REST layer.
#[derive(Debug, thiserror::Error)]
pub enum YouTubeApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("YouTube API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body (or the API's own error message) for debugging.
        body: String,
    },

    /// The endpoint URL could not be built from the configured base.
    #[error("Invalid YouTube API URL: {0}")]
    InvalidUrl(String),

    /// The body was not valid JSON.
    #[error("{0}")]
    Decode(ProviderError),
}

impl From<YouTubeApiError> for ProviderError {
    fn from(err: YouTubeApiError) -> Self {
        match err {
            YouTubeApiError::Decode(inner) => inner,
            YouTubeApiError::InvalidUrl(msg) => {
                ProviderError::NotConfigured(format!("Invalid YouTube API URL: {msg}"))
            }
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

impl fmt::Debug for YouTubeApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeApi")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl YouTubeApi {
    /// Create a new client.
    ///
    /// * `api_key` - Data API credential, sent as the `key` parameter.
    /// * `base_url` - API root, normally [`DEFAULT_BASE_URL`].
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET {base}/search?part=snippet&type=video&maxResults=20&q=..&key=..`
    pub fn search_url(&self, query: &str) -> Result<Url, YouTubeApiError> {
        let max_results = MAX_RESULTS.to_string();
        self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", self.api_key.as_str()),
            ],
        )
    }

    /// `GET {base}/videos?part=snippet&chart=mostPopular&maxResults=20&regionCode=..&key=..`
    pub fn trending_url(&self, region_code: &str) -> Result<Url, YouTubeApiError> {
        let max_results = MAX_RESULTS.to_string();
        self.endpoint(
            "videos",
            &[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("maxResults", max_results.as_str()),
                ("regionCode", region_code),
                ("key", self.api_key.as_str()),
            ],
        )
    }

    /// Run a keyword search and return the raw response.
    pub async fn search_videos(&self, query: &str) -> Result<Value, YouTubeApiError> {
        let url = self.search_url(query)?;
        self.get_json(url, Duration::from_secs(SEARCH_TIMEOUT_SECS)).await
    }

    /// Fetch the most-popular chart for a region and return the raw response.
    pub async fn most_popular(&self, region_code: &str) -> Result<Value, YouTubeApiError> {
        let url = self.trending_url(region_code)?;
        self.get_json(url, Duration::from_secs(TRENDING_TIMEOUT_SECS)).await
    }

    // ---- private helpers ----

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, YouTubeApiError> {
        Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .map_err(|e| YouTubeApiError::InvalidUrl(e.to_string()))
    }

    async fn get_json(&self, url: Url, timeout: Duration) -> Result<Value, YouTubeApiError> {
        // The URL carries the API key; keep it out of error messages.
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let response = Self::ensure_success(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?;
        decode_payload(&bytes).map_err(YouTubeApiError::Decode)
    }

    /// Ensure the response has a success status code. On failure, prefer the
    /// API's own `error.message` over the raw body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, YouTubeApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(YouTubeApiError::ApiError {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }
        Ok(response)
    }
}

/// Extract `error.message` from a Google API error body, falling back to a
/// truncated copy of the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect())
}

#[async_trait]
impl VideoProvider for YouTubeApi {
    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        match self.search_videos(query).await {
            Ok(payload) => {
                tracing::debug!(endpoint = "search", query = %query, "YouTube request succeeded");
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(endpoint = "search", error = %e, "YouTube request failed");
                Err(e.into())
            }
        }
    }

    async fn trending(&self, region_code: &str) -> Result<Value, ProviderError> {
        match self.most_popular(region_code).await {
            Ok(payload) => {
                tracing::debug!(endpoint = "videos", region = %region_code, "YouTube request succeeded");
                Ok(payload)
            }
            Err(e) => {
                tracing::warn!(endpoint = "videos", error = %e, "YouTube request failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn api() -> YouTubeApi {
        YouTubeApi::new("secret-key", DEFAULT_BASE_URL)
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Serve exactly one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}")
    }

    #[test]
    fn search_url_carries_fixed_parameters() {
        let url = api().search_url("lofi beats & chill").unwrap();
        assert_eq!(url.path(), "/youtube/v3/search");
        assert_eq!(param(&url, "part").as_deref(), Some("snippet"));
        assert_eq!(param(&url, "type").as_deref(), Some("video"));
        assert_eq!(param(&url, "maxResults").as_deref(), Some("20"));
        assert_eq!(param(&url, "q").as_deref(), Some("lofi beats & chill"));
        assert_eq!(param(&url, "key").as_deref(), Some("secret-key"));
        // The ampersand in the query must be escaped, not split into a new pair.
        assert!(!url.as_str().contains("& chill"));
    }

    #[test]
    fn trending_url_uses_region() {
        let url = api().trending_url("GB").unwrap();
        assert_eq!(url.path(), "/youtube/v3/videos");
        assert_eq!(param(&url, "chart").as_deref(), Some("mostPopular"));
        assert_eq!(param(&url, "regionCode").as_deref(), Some("GB"));
        assert_eq!(param(&url, "maxResults").as_deref(), Some("20"));
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let api = YouTubeApi::new("k", "http://localhost:9999/v3/");
        assert_eq!(api.search_url("x").unwrap().path(), "/v3/search");
    }

    #[test]
    fn debug_output_redacts_key() {
        let rendered = format!("{:?}", api());
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn error_message_prefers_api_message() {
        let body = r#"{"error":{"code":403,"message":"API key not valid."}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[tokio::test]
    async fn successful_response_is_returned_as_json() {
        let base = serve_once("200 OK", r#"{"items":[{"id":"abc"}]}"#).await;
        let payload = YouTubeApi::new("k", base).trending("IN").await.unwrap();
        assert_eq!(payload["items"][0]["id"], "abc");
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let base = serve_once(
            "403 Forbidden",
            r#"{"error":{"code":403,"message":"quotaExceeded"}}"#,
        )
        .await;
        let err = YouTubeApi::new("k", base).search("cats").await.unwrap_err();
        assert_matches!(err, ProviderError::Transport(msg) if msg.contains("403") && msg.contains("quotaExceeded"));
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let base = serve_once("200 OK", "<html>oops</html>").await;
        let err = YouTubeApi::new("k", base).search("cats").await.unwrap_err();
        assert_matches!(err, ProviderError::MalformedResponse(_));
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error_without_key() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = YouTubeApi::new("super-secret", format!("http://{addr}"))
            .search("cats")
            .await
            .unwrap_err();
        assert_matches!(&err, ProviderError::Transport(msg) if !msg.contains("super-secret"));
    }
}
