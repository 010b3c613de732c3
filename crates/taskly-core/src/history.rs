//! Completion history read path.
//!
//! The history is a read-only projection of the countdown state's
//! completion timestamps. It loads independently of the engine (no shared
//! cache), so the two may transiently disagree around a write.

use std::sync::Arc;

use chrono::{Local, TimeZone, Utc};
use tracing::warn;

use crate::countdown::{PersistedCountdownState, COUNTDOWN_KEY};
use crate::storage::KeyValueStore;

/// Shown in place of the list while no completion has been recorded.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No completions yet";

/// `Jan 5 2026, 3:07 pm` shape, in local time.
const FULL_DATE_FORMAT: &str = "%b %-d %Y, %-I:%M %P";

/// Read-only view over the persisted completion timestamps.
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Completion timestamps, newest first, in stored order. Missing or
    /// unreadable data is an empty history, never an error.
    pub async fn load(&self) -> Vec<i64> {
        match self.store.get(COUNTDOWN_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<PersistedCountdownState>(value) {
                Ok(state) => state.completed_at_timestamps,
                Err(e) => {
                    warn!(error = %e, "history did not deserialize, showing empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "history read failed, showing empty");
                Vec::new()
            }
        }
    }

    /// Formatted entries in display order. The iterator is lazy and can be
    /// recreated from the same slice at will.
    pub fn entries(timestamps: &[i64]) -> impl Iterator<Item = String> + '_ {
        timestamps.iter().map(|&ts| format_completed_at(ts))
    }
}

/// Absolute local date-time for one completion timestamp.
pub fn format_completed_at(timestamp_ms: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt
            .with_timezone(&Local)
            .format(FULL_DATE_FORMAT)
            .to_string(),
        _ => timestamp_ms.to_string(),
    }
}
