use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::TimeBreakdown;
use crate::notify::PermissionStatus;

/// Every countdown state change produces an Event.
/// The CLI prints them as JSON; a GUI shell would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A "mark complete" transition landed: the completion was prepended
    /// to the history and the new state persisted.
    CycleCompleted {
        completed_at_ms: i64,
        notification_id: Option<String>,
        history_len: usize,
        at: DateTime<Utc>,
    },
    /// A one-shot reminder was scheduled for the new cycle.
    NotificationScheduled {
        notification_id: String,
        fires_in_secs: u64,
        at: DateTime<Utc>,
    },
    /// The previous cycle's reminder was cancelled.
    NotificationCancelled {
        notification_id: String,
        at: DateTime<Utc>,
    },
    /// Notification permission was not granted; no reminder scheduled.
    PermissionDenied {
        status: PermissionStatus,
        at: DateTime<Utc>,
    },
    /// Point-in-time view of the countdown for rendering.
    StatusSnapshot {
        is_overdue: bool,
        distance: TimeBreakdown,
        last_completed_at_ms: Option<i64>,
        due_at_ms: i64,
        at: DateTime<Utc>,
    },
}
