//! Per-user preference record and its merge rules.
//!
//! The storage adapter reads the current record, merges an update with
//! [`UserPreference::apply`] (or creates one with
//! [`UserPreference::new_from_update`]) and writes the result back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::history::{SearchHistory, HISTORY_DELIMITER};
use crate::types::{Timestamp, UserId};

/// Longest accepted user identifier (an e-mail address tops out at 320).
pub const MAX_USER_ID_LEN: usize = 320;

/// Longest accepted search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 500;

/// One stored preference record; exactly one exists per `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreference {
    pub user_id: UserId,
    pub dark_mode: bool,
    pub search_history: SearchHistory,
    pub created_at: Timestamp,
}

/// A partial update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferenceUpdate {
    pub dark_mode: Option<bool>,
    pub search_query: Option<String>,
}

impl PreferenceUpdate {
    pub fn dark_mode(value: bool) -> Self {
        Self {
            dark_mode: Some(value),
            search_query: None,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            dark_mode: None,
            search_query: Some(query.into()),
        }
    }
}

impl UserPreference {
    /// First record for a previously unseen user.
    pub fn new_from_update(user_id: &str, update: &PreferenceUpdate, now: Timestamp) -> Self {
        let mut search_history = SearchHistory::new();
        if let Some(query) = &update.search_query {
            search_history.push(query.as_str());
        }
        Self {
            user_id: user_id.to_string(),
            dark_mode: update.dark_mode.unwrap_or(false),
            search_history,
            created_at: now,
        }
    }

    /// Merge an update into an existing record.
    ///
    /// `dark_mode` is last-write-wins; a search query is appended with
    /// eviction. `created_at` never changes.
    pub fn apply(&mut self, update: &PreferenceUpdate) {
        if let Some(dark_mode) = update.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(query) = &update.search_query {
            self.search_history.push(query.as_str());
        }
    }
}

/// Validate an opaque user identifier.
pub fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.trim().is_empty() {
        return Err(CoreError::Validation("user_id must not be empty".into()));
    }
    if user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(CoreError::Validation(format!(
            "user_id must be at most {MAX_USER_ID_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a search query before it is recorded.
///
/// The history column is `|`-joined, so a query carrying the delimiter
/// would come back as several entries.
pub fn validate_search_query(query: &str) -> Result<(), CoreError> {
    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(CoreError::Validation(format!(
            "search_query must be at most {MAX_SEARCH_QUERY_LEN} characters"
        )));
    }
    if query.contains(HISTORY_DELIMITER) {
        return Err(CoreError::Validation(format!(
            "search_query must not contain '{HISTORY_DELIMITER}'"
        )));
    }
    Ok(())
}
