//! Daily wisdom cache — at most one advisor request per calendar day.
//!
//! The cache is [`WisdomState::Fresh`] when the stored last-wisdom date equals
//! today and [`WisdomState::Stale`] otherwise. A stale read fetches a new
//! message under a single-flight guard, so concurrent session starts share one
//! request.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::store::day_progress;
use super::types::Habit;
use crate::advisor::Advisor;
use crate::storage::{self, KeyValueStore, DAILY_WISDOM_KEY, LAST_WISDOM_DATE_KEY};

/// Shown when today's message was fetched but the text is missing.
pub const WELCOME_BACK: &str = "Welcome back to your garden.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WisdomState {
    /// No message fetched for today.
    Stale,
    /// Today's message, already fetched.
    Fresh(String),
}

pub struct WisdomCache {
    kv: Arc<dyn KeyValueStore>,
    fetch_guard: Mutex<()>,
}

impl WisdomCache {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            fetch_guard: Mutex::new(()),
        }
    }

    /// Read the cache state for `today` without fetching anything.
    pub fn state(&self, today: NaiveDate) -> WisdomState {
        let last: Option<NaiveDate> =
            storage::load_json_or(self.kv.as_ref(), LAST_WISDOM_DATE_KEY, None);
        if last != Some(today) {
            return WisdomState::Stale;
        }
        let message: Option<String> =
            storage::load_json_or(self.kv.as_ref(), DAILY_WISDOM_KEY, None);
        WisdomState::Fresh(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| WELCOME_BACK.to_string()),
        )
    }

    /// Today's message. On a stale cache, asks `advisor` about today's
    /// completions in `habits` and stores the reply with today's date.
    pub async fn message_for(
        &self,
        today: NaiveDate,
        habits: &[Habit],
        advisor: &Advisor,
    ) -> String {
        if let WisdomState::Fresh(message) = self.state(today) {
            return message;
        }

        let _guard = self.fetch_guard.lock().await;
        // Another caller may have fetched while we waited.
        if let WisdomState::Fresh(message) = self.state(today) {
            tracing::debug!(%today, "wisdom fetched by concurrent caller");
            return message;
        }

        let progress = day_progress(habits, today);
        tracing::info!(%today, completed = progress.completed, "fetching daily wisdom");
        let message = advisor
            .daily_wisdom(progress.completed, &progress.areas)
            .await;

        if let Err(e) = storage::save_json(self.kv.as_ref(), DAILY_WISDOM_KEY, &message) {
            tracing::error!(error = %e, "failed to persist daily wisdom");
        }
        if let Err(e) = storage::save_json(self.kv.as_ref(), LAST_WISDOM_DATE_KEY, &today) {
            tracing::error!(error = %e, "failed to persist wisdom date");
        }
        message
    }
}
