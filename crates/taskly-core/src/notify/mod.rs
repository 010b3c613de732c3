//! Notification scheduling boundary.

mod stored;

pub use stored::{PendingNotification, StoredScheduler, PENDING_NOTIFICATIONS_KEY};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// OS permission result for showing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// One-shot reminder scheduling, consumed by the countdown engine.
///
/// Ids are opaque scheduler-assigned handles: they exist only so a
/// previously scheduled notification can be cancelled, and are never
/// inspected.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Ask the platform for permission to show notifications.
    async fn request_permission(&self) -> Result<PermissionStatus, NotifyError>;

    /// Schedule a notification firing `delay_secs` from now. Returns the
    /// id of the scheduled notification.
    async fn schedule_one_shot(&self, title: &str, delay_secs: u64) -> Result<String, NotifyError>;

    /// Cancel a previously scheduled notification. Best-effort: a stale id
    /// is an error the caller may ignore.
    async fn cancel(&self, notification_id: &str) -> Result<(), NotifyError>;

    /// Whether this runtime is a physical device. Permission-denied
    /// warnings are only worth showing on one.
    fn is_physical_device(&self) -> bool;
}
