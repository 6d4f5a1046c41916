//! The seam between the router and the upstream video API.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;

/// Result-count cap for both search and trending requests.
pub const MAX_RESULTS: u32 = 20;

/// Region used for trending requests when none is configured.
pub const DEFAULT_REGION_CODE: &str = "IN";

/// Request timeout for keyword searches, in seconds.
pub const SEARCH_TIMEOUT_SECS: u64 = 15;

/// Request timeout for trending requests, in seconds.
pub const TRENDING_TIMEOUT_SECS: u64 = 12;

/// An upstream source of video listings.
///
/// Implementations return the raw JSON payload; mapping into
/// [`crate::video::VideoSummary`] happens in the router.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Keyword search restricted to videos.
    async fn search(&self, query: &str) -> Result<Value, ProviderError>;

    /// Most-popular videos for a region.
    async fn trending(&self, region_code: &str) -> Result<Value, ProviderError>;
}
