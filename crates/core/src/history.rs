//! Bounded, ordered search history.
//!
//! Entries are kept oldest-first. Once the bound is exceeded the oldest
//! entries are evicted, so the collection always holds the most recent
//! `MAX_SEARCH_HISTORY` submissions in the order they were made.

use serde::{Deserialize, Serialize};

/// Maximum number of search terms retained per user.
pub const MAX_SEARCH_HISTORY: usize = 10;

/// Separator between entries in the stored history column. Never allowed
/// inside a recorded term.
pub const HISTORY_DELIMITER: char = '|';

/// Most recent search submissions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from stored entries, keeping only the newest
    /// `MAX_SEARCH_HISTORY` of them.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Append a search term, evicting the oldest entries past the bound.
    ///
    /// Terms are stored trimmed and blank terms are ignored. Duplicates are
    /// recorded like any other submission.
    pub fn push(&mut self, query: impl Into<String>) {
        let query = query.into();
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.push(query.to_string());
        if self.entries.len() > MAX_SEARCH_HISTORY {
            let overflow = self.entries.len() - MAX_SEARCH_HISTORY;
            self.entries.drain(..overflow);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently recorded term.
    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}
