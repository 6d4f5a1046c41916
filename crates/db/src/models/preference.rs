//! Row mapping for the `users` table.
//!
//! The table stores the search history as one `|`-joined string. That
//! encoding is confined to this module; everything above the repository
//! works with [`SearchHistory`]. A term that itself contains `|` comes back
//! split into several entries.

use focus_core::history::{SearchHistory, HISTORY_DELIMITER};
use focus_core::preferences::UserPreference;
use focus_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserPreferenceRow {
    pub user_id: String,
    pub dark_mode: bool,
    pub search_history: String,
    pub created_at: Timestamp,
}

impl From<UserPreferenceRow> for UserPreference {
    fn from(row: UserPreferenceRow) -> Self {
        UserPreference {
            user_id: row.user_id,
            dark_mode: row.dark_mode,
            search_history: decode_history(&row.search_history),
            created_at: row.created_at,
        }
    }
}

/// Join history entries for storage.
pub fn encode_history(history: &SearchHistory) -> String {
    history.entries().join(&HISTORY_DELIMITER.to_string())
}

/// Split a stored history column. An empty column means no history.
pub fn decode_history(raw: &str) -> SearchHistory {
    if raw.is_empty() {
        return SearchHistory::new();
    }
    SearchHistory::from_entries(raw.split(HISTORY_DELIMITER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_is_empty_history() {
        assert!(decode_history("").is_empty());
        assert_eq!(encode_history(&SearchHistory::new()), "");
    }

    #[test]
    fn entries_are_joined_with_pipes() {
        let history = SearchHistory::from_entries(["lofi beats", "jazz"]);
        assert_eq!(encode_history(&history), "lofi beats|jazz");
        assert_eq!(decode_history("lofi beats|jazz"), history);
    }

    #[test]
    fn delimiter_inside_a_term_splits_it() {
        let history = SearchHistory::from_entries(["a|b"]);
        assert_eq!(decode_history(&encode_history(&history)).entries(), ["a", "b"]);
    }

    #[test]
    fn oversized_column_is_trimmed_on_read() {
        let raw: Vec<String> = (0..12).map(|i| format!("q{i}")).collect();
        let history = decode_history(&raw.join("|"));
        assert_eq!(history.len(), 10);
        assert_eq!(history.entries()[0], "q2");
    }
}
