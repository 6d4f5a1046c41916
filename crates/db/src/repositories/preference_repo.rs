//! Repository for the `users` preference table.

use chrono::Utc;
use focus_core::preferences::{PreferenceUpdate, UserPreference};
use sqlx::SqlitePool;

use crate::models::preference::{encode_history, UserPreferenceRow};

/// Column list for `users` queries.
const COLUMNS: &str = "user_id, dark_mode, search_history, created_at";

/// Provides read / upsert access to per-user preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Get the preference record for a user.
    ///
    /// Returns `None` if the user has never saved anything.
    pub async fn get(
        pool: &SqlitePool,
        user_id: &str,
    ) -> Result<Option<UserPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_id = ?1");
        let row = sqlx::query_as::<_, UserPreferenceRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(UserPreference::from))
    }

    /// Create or update a user's preferences.
    ///
    /// Reads the current record, merges the update in memory and writes the
    /// result with a single `INSERT ... ON CONFLICT (user_id) DO UPDATE`.
    /// `created_at` is only written on insert. An update with nothing set
    /// still performs the write.
    ///
    /// The read and the write are separate statements: two concurrent
    /// upserts for the same user can lose one of the updates.
    pub async fn upsert(
        pool: &SqlitePool,
        user_id: &str,
        update: &PreferenceUpdate,
    ) -> Result<UserPreference, sqlx::Error> {
        let merged = match Self::get(pool, user_id).await? {
            Some(mut existing) => {
                existing.apply(update);
                existing
            }
            None => UserPreference::new_from_update(user_id, update, Utc::now()),
        };

        let query = format!(
            "INSERT INTO users (user_id, dark_mode, search_history, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 dark_mode = excluded.dark_mode, \
                 search_history = excluded.search_history \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserPreferenceRow>(&query)
            .bind(&merged.user_id)
            .bind(merged.dark_mode)
            .bind(encode_history(&merged.search_history))
            .bind(merged.created_at)
            .fetch_one(pool)
            .await?;

        tracing::debug!(
            user_id = %row.user_id,
            dark_mode = row.dark_mode,
            "User preferences written",
        );

        Ok(row.into())
    }
}
