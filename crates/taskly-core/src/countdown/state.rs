use serde::{Deserialize, Serialize};

/// Persisted countdown state, replaced wholesale on every completion.
///
/// Storage layout:
/// `{ "currentNotificationId": string|null, "completedAtTimestamps": [ms, ...] }`
/// with timestamps in epoch milliseconds, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCountdownState {
    /// Id of the one pending scheduled notification, if any. Held only so
    /// it can be cancelled before the next reminder is scheduled.
    #[serde(default)]
    pub current_notification_id: Option<String>,
    /// Completion timestamps, newest first. Prepend-only.
    #[serde(default)]
    pub completed_at_timestamps: Vec<i64>,
}

impl PersistedCountdownState {
    /// Most recent completion -- the sole input to due-time computation.
    pub fn last_completed_at_ms(&self) -> Option<i64> {
        self.completed_at_timestamps.first().copied()
    }

    /// Next cycle: `now_ms` prepended, previous notification id replaced.
    pub fn completed(&self, now_ms: i64, notification_id: Option<String>) -> Self {
        let mut timestamps = Vec::with_capacity(self.completed_at_timestamps.len() + 1);
        timestamps.push(now_ms);
        timestamps.extend_from_slice(&self.completed_at_timestamps);
        Self {
            current_notification_id: notification_id,
            completed_at_timestamps: timestamps,
        }
    }
}
