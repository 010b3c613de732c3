//! Countdown engine implementation.
//!
//! The engine is a wall-clock state machine over one persisted value: the
//! caller supplies the current time, the engine derives PENDING/OVERDUE
//! from the most recent completion and the fixed recurrence interval.
//!
//! ## State Transitions
//!
//! ```text
//! (no cycle) -> complete() -> Pending -> (due elapses) -> Overdue
//!                   ^                                        |
//!                   +------------- complete() <-------------+
//! ```
//!
//! `complete()` coordinates the one external side effect: exactly one
//! reminder is pending per cycle, so the previous one is cancelled when a
//! new one is scheduled. The state write is two-phase -- applied in memory
//! first, rolled back if the store refuses it.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::{due_at_ms, CountdownStatus, CountdownStore, PersistedCountdownState};
use crate::config::CountdownConfig;
use crate::error::StorageError;
use crate::events::Event;
use crate::notify::{NotificationScheduler, PermissionStatus};

/// Shown when reminder permission is refused on a physical device.
pub const PERMISSION_WARNING: &str =
    "Unable to schedule notification. Enable the notification permission for Taskly in settings.";

/// Result of a "mark complete" transition.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    /// What happened, in order, for callers that render events.
    pub events: Vec<Event>,
    /// Present when permission was not granted on a physical device.
    /// The caller decides how to surface it; nothing was scheduled.
    pub warning: Option<String>,
}

/// Core countdown engine.
///
/// Owns the in-memory copy of the persisted state; the state is read once
/// at construction and replaced wholesale on every completion.
pub struct CountdownEngine {
    store: CountdownStore,
    scheduler: Arc<dyn NotificationScheduler>,
    frequency_ms: i64,
    title: String,
    state: PersistedCountdownState,
}

impl CountdownEngine {
    /// Read persisted state once and build the engine around it.
    pub async fn load(
        store: CountdownStore,
        scheduler: Arc<dyn NotificationScheduler>,
        config: &CountdownConfig,
    ) -> Self {
        let state = store.load().await;
        Self {
            store,
            scheduler,
            frequency_ms: config.frequency_ms(),
            title: config.title.clone(),
            state,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &PersistedCountdownState {
        &self.state
    }

    pub fn last_completed_at_ms(&self) -> Option<i64> {
        self.state.last_completed_at_ms()
    }

    /// Display status at `now_ms`. Pure with respect to the engine state.
    pub fn status(&self, now_ms: i64) -> CountdownStatus {
        CountdownStatus::at(now_ms, self.state.last_completed_at_ms(), self.frequency_ms)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now_ms: i64) -> Event {
        let status = self.status(now_ms);
        Event::StatusSnapshot {
            is_overdue: status.is_overdue,
            distance: status.distance,
            last_completed_at_ms: self.state.last_completed_at_ms(),
            due_at_ms: due_at_ms(now_ms, self.state.last_completed_at_ms(), self.frequency_ms),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark the recurring task done at `now_ms`.
    ///
    /// Requests permission and schedules the next reminder, cancels the
    /// previous one (best-effort), prepends the completion timestamp and
    /// persists the new state. A failed persist rolls the in-memory state
    /// back and surfaces the error.
    pub async fn complete(&mut self, now_ms: i64) -> Result<CompletionOutcome, StorageError> {
        let mut events = Vec::new();
        let mut warning = None;

        let notification_id = match self.scheduler.request_permission().await {
            Ok(PermissionStatus::Granted) => {
                let delay_secs = (self.frequency_ms / 1000).max(0) as u64;
                match self.scheduler.schedule_one_shot(&self.title, delay_secs).await {
                    Ok(id) => {
                        events.push(Event::NotificationScheduled {
                            notification_id: id.clone(),
                            fires_in_secs: delay_secs,
                            at: Utc::now(),
                        });
                        Some(id)
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to schedule reminder");
                        None
                    }
                }
            }
            Ok(status) => {
                events.push(Event::PermissionDenied { status, at: Utc::now() });
                // Permission prompts are meaningless off-device.
                if self.scheduler.is_physical_device() {
                    warning = Some(PERMISSION_WARNING.to_string());
                }
                None
            }
            Err(e) => {
                warn!(error = %e, "notification permission request failed");
                None
            }
        };

        // Stale reminder cleanup is best-effort: the new cycle is correct
        // whether or not this lands.
        if let Some(old_id) = self.state.current_notification_id.clone() {
            match self.scheduler.cancel(&old_id).await {
                Ok(()) => events.push(Event::NotificationCancelled {
                    notification_id: old_id,
                    at: Utc::now(),
                }),
                Err(e) => warn!(id = %old_id, error = %e, "failed to cancel stale reminder"),
            }
        }

        let new_state = self.state.completed(now_ms, notification_id.clone());
        let previous = std::mem::replace(&mut self.state, new_state);
        if let Err(e) = self.store.save(&self.state).await {
            self.state = previous;
            return Err(e);
        }

        events.push(Event::CycleCompleted {
            completed_at_ms: now_ms,
            notification_id,
            history_len: self.state.completed_at_timestamps.len(),
            at: Utc::now(),
        });

        Ok(CompletionOutcome { events, warning })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::NotifyError;
    use crate::storage::{KeyValueStore, MemoryStore};

    const T1: i64 = 1_700_000_000_000;
    const T2: i64 = 1_700_000_060_000;

    struct MockScheduler {
        permission: PermissionStatus,
        physical: bool,
        next_id: String,
        scheduled: Mutex<Vec<(String, u64)>>,
        cancelled: Mutex<Vec<String>>,
    }

    impl MockScheduler {
        fn granting(next_id: &str) -> Self {
            Self {
                permission: PermissionStatus::Granted,
                physical: true,
                next_id: next_id.to_string(),
                scheduled: Mutex::new(Vec::new()),
                cancelled: Mutex::new(Vec::new()),
            }
        }

        fn denying(physical: bool) -> Self {
            Self {
                permission: PermissionStatus::Denied,
                physical,
                next_id: String::new(),
                scheduled: Mutex::new(Vec::new()),
                cancelled: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NotificationScheduler for MockScheduler {
        async fn request_permission(&self) -> Result<PermissionStatus, NotifyError> {
            Ok(self.permission)
        }

        async fn schedule_one_shot(
            &self,
            title: &str,
            delay_secs: u64,
        ) -> Result<String, NotifyError> {
            self.scheduled
                .lock()
                .unwrap()
                .push((title.to_string(), delay_secs));
            Ok(self.next_id.clone())
        }

        async fn cancel(&self, notification_id: &str) -> Result<(), NotifyError> {
            self.cancelled
                .lock()
                .unwrap()
                .push(notification_id.to_string());
            Ok(())
        }

        fn is_physical_device(&self) -> bool {
            self.physical
        }
    }

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StorageError> {
            Ok(None)
        }

        async fn set(&self, key: &str, _value: serde_json::Value) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "disk full".into(),
            })
        }
    }

    fn test_config() -> CountdownConfig {
        CountdownConfig {
            frequency_secs: 10,
            title: "The thing is due!".into(),
        }
    }

    async fn engine_over(
        kv: Arc<dyn KeyValueStore>,
        scheduler: Arc<MockScheduler>,
    ) -> CountdownEngine {
        CountdownEngine::load(CountdownStore::new(kv), scheduler, &test_config()).await
    }

    #[tokio::test]
    async fn complete_replaces_notification_and_prepends() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        CountdownStore::new(Arc::clone(&kv))
            .save(&PersistedCountdownState {
                current_notification_id: Some("abc".into()),
                completed_at_timestamps: vec![T1],
            })
            .await
            .unwrap();

        let scheduler = Arc::new(MockScheduler::granting("xyz"));
        let mut engine = engine_over(Arc::clone(&kv), Arc::clone(&scheduler)).await;

        let outcome = engine.complete(T2).await.unwrap();

        assert_eq!(engine.state().current_notification_id.as_deref(), Some("xyz"));
        assert_eq!(engine.state().completed_at_timestamps, vec![T2, T1]);
        assert_eq!(*scheduler.cancelled.lock().unwrap(), vec!["abc".to_string()]);
        assert!(outcome.warning.is_none());

        // The new state was persisted, not just applied in memory.
        let persisted = CountdownStore::new(kv).load().await;
        assert_eq!(persisted, *engine.state());
    }

    #[tokio::test]
    async fn complete_schedules_with_configured_frequency() {
        let scheduler = Arc::new(MockScheduler::granting("id-1"));
        let mut engine =
            engine_over(Arc::new(MemoryStore::new()), Arc::clone(&scheduler)).await;

        engine.complete(T1).await.unwrap();

        assert_eq!(
            *scheduler.scheduled.lock().unwrap(),
            vec![("The thing is due!".to_string(), 10)]
        );
        // Nothing to cancel on the first cycle.
        assert!(scheduler.cancelled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn denied_off_device_prepends_without_warning() {
        let scheduler = Arc::new(MockScheduler::denying(false));
        let mut engine =
            engine_over(Arc::new(MemoryStore::new()), Arc::clone(&scheduler)).await;

        let outcome = engine.complete(T1).await.unwrap();

        assert!(outcome.warning.is_none());
        assert!(engine.state().current_notification_id.is_none());
        assert_eq!(engine.state().completed_at_timestamps, vec![T1]);
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn denied_on_device_surfaces_warning() {
        let scheduler = Arc::new(MockScheduler::denying(true));
        let mut engine =
            engine_over(Arc::new(MemoryStore::new()), Arc::clone(&scheduler)).await;

        let outcome = engine.complete(T1).await.unwrap();

        assert_eq!(outcome.warning.as_deref(), Some(PERMISSION_WARNING));
        assert!(engine.state().current_notification_id.is_none());
    }

    #[tokio::test]
    async fn failed_persist_rolls_back() {
        let scheduler = Arc::new(MockScheduler::granting("id-1"));
        let mut engine = engine_over(Arc::new(FailingStore), Arc::clone(&scheduler)).await;

        let err = engine.complete(T1).await.unwrap_err();

        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(*engine.state(), PersistedCountdownState::default());
    }

    #[tokio::test]
    async fn status_tracks_cycle_boundaries() {
        let scheduler = Arc::new(MockScheduler::granting("id-1"));
        let mut engine =
            engine_over(Arc::new(MemoryStore::new()), Arc::clone(&scheduler)).await;

        // No cycle yet: due now, never overdue.
        assert!(!engine.status(T1).is_overdue);

        engine.complete(T1).await.unwrap();
        assert!(!engine.status(T1 + 3_000).is_overdue);
        assert!(engine.status(T1 + 15_000).is_overdue);
    }
}
