//! Stored-pending scheduler for desktop builds.
//!
//! A mobile OS keeps scheduled notifications itself; here the pending
//! one-shot is persisted under its own key and drained by the watch loop
//! once due. Permission is always granted on desktop.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NotificationScheduler, PermissionStatus};
use crate::error::{NotifyError, StorageError};
use crate::storage::KeyValueStore;

/// Fixed storage key for pending reminder records.
pub const PENDING_NOTIFICATIONS_KEY: &str = "taskly-pending-notifications";

/// A scheduled-but-not-yet-fired reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub id: String,
    pub title: String,
    pub due_at_ms: i64,
}

/// Sole writer of [`PENDING_NOTIFICATIONS_KEY`].
pub struct StoredScheduler {
    store: Arc<dyn KeyValueStore>,
}

impl StoredScheduler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<PendingNotification>, StorageError> {
        match self.store.get(PENDING_NOTIFICATIONS_KEY).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                StorageError::QueryFailed(format!("pending notifications did not deserialize: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, pending: &[PendingNotification]) -> Result<(), StorageError> {
        let value = serde_json::to_value(pending).map_err(|e| StorageError::WriteFailed {
            key: PENDING_NOTIFICATIONS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(PENDING_NOTIFICATIONS_KEY, value).await
    }

    /// All pending reminders, for diagnostics.
    pub async fn pending(&self) -> Result<Vec<PendingNotification>, StorageError> {
        self.load().await
    }

    /// Remove and return every reminder due at `now_ms`, for delivery.
    /// Each reminder fires at most once.
    pub async fn take_due(&self, now_ms: i64) -> Result<Vec<PendingNotification>, StorageError> {
        let pending = self.load().await?;
        let (due, remaining): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(|n| n.due_at_ms <= now_ms);
        if !due.is_empty() {
            self.save(&remaining).await?;
        }
        Ok(due)
    }
}

#[async_trait]
impl NotificationScheduler for StoredScheduler {
    async fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
        // Desktop builds need no runtime permission prompt.
        Ok(PermissionStatus::Granted)
    }

    async fn schedule_one_shot(&self, title: &str, delay_secs: u64) -> Result<String, NotifyError> {
        let mut pending = self
            .load()
            .await
            .map_err(|e| NotifyError::ScheduleFailed(e.to_string()))?;
        let id = Uuid::new_v4().to_string();
        let due_at_ms = Utc::now()
            .timestamp_millis()
            .saturating_add((delay_secs as i64).saturating_mul(1000));
        pending.push(PendingNotification {
            id: id.clone(),
            title: title.to_string(),
            due_at_ms,
        });
        self.save(&pending)
            .await
            .map_err(|e| NotifyError::ScheduleFailed(e.to_string()))?;
        Ok(id)
    }

    async fn cancel(&self, notification_id: &str) -> Result<(), NotifyError> {
        let mut pending = self.load().await.map_err(|e| NotifyError::CancelFailed {
            id: notification_id.to_string(),
            message: e.to_string(),
        })?;
        let before = pending.len();
        pending.retain(|n| n.id != notification_id);
        if pending.len() == before {
            return Err(NotifyError::CancelFailed {
                id: notification_id.to_string(),
                message: "no pending notification with that id".into(),
            });
        }
        self.save(&pending).await.map_err(|e| NotifyError::CancelFailed {
            id: notification_id.to_string(),
            message: e.to_string(),
        })
    }

    fn is_physical_device(&self) -> bool {
        true
    }
}
