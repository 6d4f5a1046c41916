//! Normalisation of provider search / trending payloads into display cards.
//!
//! Both mappers preserve the provider's ordering and never fail on a
//! missing or oddly-typed optional field: every absent value resolves to a
//! placeholder. Only a payload whose top-level shape is unusable is an
//! error.

use serde::Serialize;
use serde_json::Value;

use crate::error::ProviderError;

/// Placeholder title for entries without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Placeholder channel name for entries without one.
pub const DEFAULT_CHANNEL: &str = "Unknown";

/// Thumbnail variant used on cards.
pub const THUMBNAIL_VARIANT: &str = "medium";

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Badge shown alongside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCategory {
    Video,
    Trending,
}

impl VideoCategory {
    pub fn label(self) -> &'static str {
        match self {
            VideoCategory::Video => "Video",
            VideoCategory::Trending => "Trending",
        }
    }
}

/// Display-ready summary of one video result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_name: String,
    pub thumbnail_url: String,
    pub watch_url: String,
    pub category: VideoCategory,
    pub category_label: &'static str,
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Decode raw response bytes into a JSON value.
pub fn decode_payload(bytes: &[u8]) -> Result<Value, ProviderError> {
    serde_json::from_slice(bytes).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// Map a keyword-search response (`items[].id.videoId`).
pub fn map_search_response(payload: &Value) -> Result<Vec<VideoSummary>, ProviderError> {
    map_items(payload, VideoCategory::Video, |item| {
        item.get("id")
            .and_then(|id| id.get("videoId"))
            .and_then(Value::as_str)
    })
}

/// Map a "most popular" response (`items[].id` is the id itself).
pub fn map_trending_response(payload: &Value) -> Result<Vec<VideoSummary>, ProviderError> {
    map_items(payload, VideoCategory::Trending, |item| {
        item.get("id").and_then(Value::as_str)
    })
}

fn map_items<F>(
    payload: &Value,
    category: VideoCategory,
    video_id: F,
) -> Result<Vec<VideoSummary>, ProviderError>
where
    F: Fn(&Value) -> Option<&str>,
{
    let Value::Object(root) = payload else {
        return Err(ProviderError::MalformedResponse(format!(
            "expected a JSON object at the top level, got {}",
            kind_of(payload)
        )));
    };

    let items = match root.get("items") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ProviderError::MalformedResponse(format!(
                "expected `items` to be an array, got {}",
                kind_of(other)
            )))
        }
    };

    Ok(items
        .iter()
        .map(|item| summarize(item, video_id(item).unwrap_or_default(), category))
        .collect())
}

fn summarize(item: &Value, video_id: &str, category: VideoCategory) -> VideoSummary {
    let snippet = item.get("snippet").filter(|s| !s.is_null());
    let field = |name: &str| snippet.and_then(|s| s.get(name)).and_then(Value::as_str);

    let thumbnail_url = snippet
        .and_then(|s| s.get("thumbnails"))
        .and_then(|t| t.get(THUMBNAIL_VARIANT))
        .and_then(|m| m.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    VideoSummary {
        video_id: video_id.to_string(),
        title: field("title").unwrap_or(DEFAULT_TITLE).to_string(),
        description: field("description").unwrap_or_default().to_string(),
        channel_name: field("channelTitle").unwrap_or(DEFAULT_CHANNEL).to_string(),
        thumbnail_url: thumbnail_url.to_string(),
        watch_url: watch_url(video_id),
        category,
        category_label: category.label(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
