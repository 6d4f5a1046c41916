//! Resolves UI triggers into a single provider call and the content to show.
//!
//! Several triggers can be present at once (the home button, a voice
//! transcript, the typed query). [`TriggerSet::resolve`] picks exactly one
//! by fixed priority; [`QueryRouter::route`] then issues at most one
//! upstream request and produces the results, a header, and the text the
//! query box should now display.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::provider::VideoProvider;
use crate::video::{map_search_response, map_trending_response, VideoSummary};

pub const NOT_CONFIGURED_MESSAGE: &str = "YouTube API key is not configured";
pub const WELCOME_MESSAGE: &str =
    "Search YouTube without the noise. Use the search bar above to find videos.";
pub const NO_RESULTS_MESSAGE: &str = "No results found for your search";
pub const NO_TRENDING_MESSAGE: &str = "No trending videos found.";

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Every signal the client may send in one request cycle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerSet {
    #[serde(default)]
    pub home: bool,
    pub voice_transcript: Option<String>,
    pub typed_text: Option<String>,
}

/// The single trigger acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Show trending videos.
    Home,
    /// Search for a transcribed voice query.
    Voice(String),
    /// Search for typed text.
    Typed(String),
    /// Nothing to act on.
    Idle,
}

impl TriggerSet {
    /// Pick one trigger: home, then voice, then typed text, then idle.
    ///
    /// Blank transcripts and blank typed text count as absent; the chosen
    /// query is trimmed.
    pub fn resolve(&self) -> Trigger {
        match (
            self.home,
            non_blank(self.voice_transcript.as_deref()),
            non_blank(self.typed_text.as_deref()),
        ) {
            (true, _, _) => Trigger::Home,
            (false, Some(voice), _) => Trigger::Voice(voice.to_string()),
            (false, None, Some(typed)) => Trigger::Typed(typed.to_string()),
            (false, None, None) => Trigger::Idle,
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Welcome,
    NoResults,
    NotConfigured,
    Error,
}

/// An informational placeholder shown instead of video cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// One entry in the results area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "snake_case")]
pub enum DisplayItem {
    Video(VideoSummary),
    Notice(Notice),
}

/// Describes what the results area is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsHeader {
    None,
    Trending,
    /// `count` is absent when the search came back empty.
    Results { query: String, count: Option<usize> },
}

impl ResultsHeader {
    /// Human-readable heading, if any.
    pub fn title(&self) -> Option<String> {
        match self {
            ResultsHeader::None => None,
            ResultsHeader::Trending => Some("Trending Videos".to_string()),
            ResultsHeader::Results { query, count: None } => Some(format!("Results for: {query}")),
            ResultsHeader::Results {
                query,
                count: Some(count),
            } => Some(format!("Results for: {query} • {count} videos")),
        }
    }
}

/// Everything the client needs to redraw after one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub items: Vec<DisplayItem>,
    pub header: ResultsHeader,
    /// Text the query box should display afterwards.
    pub visible_text: String,
    /// The query that was searched successfully, for history recording.
    pub resolved_query: Option<String>,
}

impl RouteOutcome {
    fn notice(notice: Notice, header: ResultsHeader, visible_text: impl Into<String>) -> Self {
        Self {
            items: vec![DisplayItem::Notice(notice)],
            header,
            visible_text: visible_text.into(),
            resolved_query: None,
        }
    }

    /// The notice shown in place of results, if there is one.
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self.items.as_slice() {
            [DisplayItem::Notice(notice)] => Some(notice.kind),
            _ => None,
        }
    }

    /// The video cards, in provider order.
    pub fn videos(&self) -> impl Iterator<Item = &VideoSummary> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Video(video) => Some(video),
            DisplayItem::Notice(_) => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes trigger sets to the provider.
///
/// A `None` provider means the API key is not configured; every request
/// that would need the provider short-circuits to a notice.
#[derive(Clone)]
pub struct QueryRouter {
    provider: Option<Arc<dyn VideoProvider>>,
    region_code: String,
}

impl QueryRouter {
    pub fn new(provider: Option<Arc<dyn VideoProvider>>, region_code: impl Into<String>) -> Self {
        Self {
            provider,
            region_code: region_code.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Handle one request cycle.
    ///
    /// `previous_visible_text` is what the query box showed before the
    /// trigger fired; it is echoed back whenever the outcome preserves it.
    pub async fn route(&self, triggers: &TriggerSet, previous_visible_text: &str) -> RouteOutcome {
        match triggers.resolve() {
            Trigger::Home => self.route_trending().await,
            Trigger::Voice(query) | Trigger::Typed(query) => {
                self.route_search(query, previous_visible_text).await
            }
            Trigger::Idle => RouteOutcome::notice(
                Notice::new(NoticeKind::Welcome, WELCOME_MESSAGE),
                ResultsHeader::None,
                previous_visible_text,
            ),
        }
    }

    /// Trending always clears the query box, whatever the outcome.
    async fn route_trending(&self) -> RouteOutcome {
        let Some(provider) = &self.provider else {
            return not_configured("");
        };

        let result = provider
            .trending(&self.region_code)
            .await
            .and_then(|payload| map_trending_response(&payload));

        match result {
            Ok(videos) if videos.is_empty() => RouteOutcome::notice(
                Notice::new(NoticeKind::NoResults, NO_TRENDING_MESSAGE),
                ResultsHeader::Trending,
                "",
            ),
            Ok(videos) => {
                tracing::debug!(count = videos.len(), region = %self.region_code, "Trending videos loaded");
                RouteOutcome {
                    items: videos.into_iter().map(DisplayItem::Video).collect(),
                    header: ResultsHeader::Trending,
                    visible_text: String::new(),
                    resolved_query: None,
                }
            }
            Err(ProviderError::NotConfigured(_)) => not_configured(""),
            Err(e) => {
                tracing::warn!(error = %e, "Trending request failed");
                RouteOutcome::notice(
                    Notice::new(NoticeKind::Error, format!("Error fetching trending videos: {e}")),
                    ResultsHeader::None,
                    "",
                )
            }
        }
    }

    async fn route_search(&self, query: String, previous_visible_text: &str) -> RouteOutcome {
        let Some(provider) = &self.provider else {
            return not_configured(previous_visible_text);
        };

        let result = provider
            .search(&query)
            .await
            .and_then(|payload| map_search_response(&payload));

        match result {
            Ok(videos) if videos.is_empty() => RouteOutcome {
                items: vec![DisplayItem::Notice(Notice::new(
                    NoticeKind::NoResults,
                    NO_RESULTS_MESSAGE,
                ))],
                header: ResultsHeader::Results {
                    query: query.clone(),
                    count: None,
                },
                visible_text: query.clone(),
                resolved_query: Some(query),
            },
            Ok(videos) => {
                tracing::debug!(count = videos.len(), query = %query, "Search results loaded");
                RouteOutcome {
                    header: ResultsHeader::Results {
                        query: query.clone(),
                        count: Some(videos.len()),
                    },
                    items: videos.into_iter().map(DisplayItem::Video).collect(),
                    visible_text: query.clone(),
                    resolved_query: Some(query),
                }
            }
            Err(ProviderError::NotConfigured(_)) => not_configured(previous_visible_text),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Search request failed");
                let message = match &e {
                    ProviderError::MalformedResponse(_) => {
                        format!("An unexpected error occurred: {e}")
                    }
                    _ => format!("Error connecting to YouTube API: {e}"),
                };
                RouteOutcome::notice(
                    Notice::new(NoticeKind::Error, message),
                    ResultsHeader::None,
                    previous_visible_text,
                )
            }
        }
    }
}

fn not_configured(visible_text: &str) -> RouteOutcome {
    RouteOutcome::notice(
        Notice::new(NoticeKind::NotConfigured, NOT_CONFIGURED_MESSAGE),
        ResultsHeader::None,
        visible_text,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;

    /// Canned provider that records every call it receives.
    struct FakeProvider {
        response: Result<Value, ProviderError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn returning(response: Result<Value, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoProvider for FakeProvider {
        async fn search(&self, query: &str) -> Result<Value, ProviderError> {
            self.calls.lock().unwrap().push(format!("search:{query}"));
            self.response.clone()
        }

        async fn trending(&self, region_code: &str) -> Result<Value, ProviderError> {
            self.calls.lock().unwrap().push(format!("trending:{region_code}"));
            self.response.clone()
        }
    }

    fn search_payload(n: usize) -> Value {
        let items: Vec<Value> = (0..n)
            .map(|i| json!({ "id": { "videoId": format!("v{i}") }, "snippet": { "title": format!("T{i}") } }))
            .collect();
        json!({ "items": items })
    }

    fn router(provider: &Arc<FakeProvider>) -> QueryRouter {
        QueryRouter::new(Some(provider.clone() as Arc<dyn VideoProvider>), "IN")
    }

    fn typed(text: &str) -> TriggerSet {
        TriggerSet {
            typed_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    // -- resolve --

    #[test]
    fn home_beats_everything() {
        let triggers = TriggerSet {
            home: true,
            voice_transcript: Some("voice".into()),
            typed_text: Some("typed".into()),
        };
        assert_eq!(triggers.resolve(), Trigger::Home);
    }

    #[test]
    fn voice_beats_typed() {
        let triggers = TriggerSet {
            home: false,
            voice_transcript: Some("  voice  ".into()),
            typed_text: Some("typed".into()),
        };
        assert_eq!(triggers.resolve(), Trigger::Voice("voice".into()));
    }

    #[test]
    fn blank_voice_falls_through_to_typed() {
        let triggers = TriggerSet {
            home: false,
            voice_transcript: Some("   ".into()),
            typed_text: Some(" typed ".into()),
        };
        assert_eq!(triggers.resolve(), Trigger::Typed("typed".into()));
    }

    #[test]
    fn nothing_present_is_idle() {
        assert_eq!(TriggerSet::default().resolve(), Trigger::Idle);
        assert_eq!(typed("\t").resolve(), Trigger::Idle);
    }

    #[test]
    fn header_titles() {
        assert_eq!(ResultsHeader::None.title(), None);
        assert_eq!(ResultsHeader::Trending.title().as_deref(), Some("Trending Videos"));
        let header = ResultsHeader::Results {
            query: "lofi beats".into(),
            count: Some(3),
        };
        assert_eq!(header.title().as_deref(), Some("Results for: lofi beats • 3 videos"));
    }

    // -- route --

    #[tokio::test]
    async fn home_and_typed_together_routes_to_trending_and_clears_text() {
        let provider = FakeProvider::returning(Ok(search_payload(0)));
        let triggers = TriggerSet {
            home: true,
            typed_text: Some("cats".into()),
            ..Default::default()
        };

        let outcome = router(&provider).route(&triggers, "cats").await;

        assert_eq!(provider.calls(), ["trending:IN"]);
        assert_eq!(outcome.visible_text, "");
        assert_eq!(outcome.header, ResultsHeader::Trending);
        assert_eq!(outcome.resolved_query, None);
    }

    #[tokio::test]
    async fn trending_maps_cards() {
        let payload = json!({ "items": [
            { "id": "a", "snippet": { "title": "A" } },
            { "id": "b", "snippet": { "title": "B" } }
        ] });
        let provider = FakeProvider::returning(Ok(payload));
        let outcome = router(&provider)
            .route(&TriggerSet { home: true, ..Default::default() }, "old")
            .await;

        let ids: Vec<&str> = outcome.videos().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(outcome.visible_text, "");
    }

    #[tokio::test]
    async fn trending_failure_still_clears_text() {
        let provider = FakeProvider::returning(Err(ProviderError::Transport("timed out".into())));
        let outcome = router(&provider)
            .route(&TriggerSet { home: true, ..Default::default() }, "old")
            .await;

        assert_eq!(outcome.notice_kind(), Some(NoticeKind::Error));
        assert_eq!(outcome.visible_text, "");
        assert_eq!(outcome.header, ResultsHeader::None);
    }

    #[tokio::test]
    async fn typed_search_returns_summaries_header_and_text() {
        let provider = FakeProvider::returning(Ok(search_payload(3)));
        let outcome = router(&provider).route(&typed("lofi beats"), "").await;

        assert_eq!(provider.calls(), ["search:lofi beats"]);
        assert_eq!(outcome.videos().count(), 3);
        assert_eq!(
            outcome.header,
            ResultsHeader::Results {
                query: "lofi beats".into(),
                count: Some(3)
            }
        );
        let title = outcome.header.title().unwrap();
        assert!(title.contains("lofi beats") && title.contains('3'));
        assert_eq!(outcome.visible_text, "lofi beats");
        assert_eq!(outcome.resolved_query.as_deref(), Some("lofi beats"));
    }

    #[tokio::test]
    async fn voice_transcript_is_searched_over_typed_text() {
        let provider = FakeProvider::returning(Ok(search_payload(1)));
        let triggers = TriggerSet {
            home: false,
            voice_transcript: Some("spoken words".into()),
            typed_text: Some("typed words".into()),
        };
        let outcome = router(&provider).route(&triggers, "typed words").await;

        assert_eq!(provider.calls(), ["search:spoken words"]);
        assert_eq!(outcome.visible_text, "spoken words");
    }

    #[tokio::test]
    async fn empty_search_yields_single_no_results_notice() {
        let provider = FakeProvider::returning(Ok(json!({ "items": [] })));
        let outcome = router(&provider).route(&typed("zzzz"), "").await;

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.notice_kind(), Some(NoticeKind::NoResults));
        assert_eq!(outcome.visible_text, "zzzz");
        assert_matches!(outcome.header, ResultsHeader::Results { count: None, .. });
    }

    #[tokio::test]
    async fn transport_failure_preserves_previous_text() {
        let provider = FakeProvider::returning(Err(ProviderError::Transport("503".into())));
        let outcome = router(&provider).route(&typed("new query"), "old query").await;

        assert_eq!(outcome.notice_kind(), Some(NoticeKind::Error));
        assert_eq!(outcome.visible_text, "old query");
        assert_eq!(outcome.resolved_query, None);
        assert_matches!(
            &outcome.items[0],
            DisplayItem::Notice(Notice { message, .. }) if message.contains("503")
        );
    }

    #[tokio::test]
    async fn malformed_payload_recovers_like_transport_failure() {
        let provider = FakeProvider::returning(Ok(json!("not an object")));
        let outcome = router(&provider).route(&typed("q"), "prev").await;

        assert_eq!(outcome.notice_kind(), Some(NoticeKind::Error));
        assert_eq!(outcome.visible_text, "prev");
    }

    #[tokio::test]
    async fn idle_shows_welcome_and_keeps_text() {
        let provider = FakeProvider::returning(Ok(search_payload(1)));
        let outcome = router(&provider).route(&typed("   "), "kept").await;

        assert!(provider.calls().is_empty());
        assert_eq!(outcome.notice_kind(), Some(NoticeKind::Welcome));
        assert_eq!(outcome.visible_text, "kept");
    }

    #[tokio::test]
    async fn missing_provider_short_circuits() {
        let router = QueryRouter::new(None, "IN");
        assert!(!router.is_configured());

        let search = router.route(&typed("q"), "prev").await;
        assert_eq!(search.notice_kind(), Some(NoticeKind::NotConfigured));
        assert_eq!(search.visible_text, "prev");

        let home = router.route(&TriggerSet { home: true, ..Default::default() }, "prev").await;
        assert_eq!(home.notice_kind(), Some(NoticeKind::NotConfigured));
        assert_eq!(home.visible_text, "");
    }
}
