use std::sync::Arc;

use tracing::warn;

use super::PersistedCountdownState;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Fixed storage key for the countdown state.
pub const COUNTDOWN_KEY: &str = "taskly-countdown";

/// Sole writer of [`COUNTDOWN_KEY`]. The history log reads the same key
/// but never writes it.
pub struct CountdownStore {
    store: Arc<dyn KeyValueStore>,
}

impl CountdownStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted state, falling back to the empty default when the
    /// key was never written or does not deserialize. A failed read must
    /// never take down a UI tick.
    pub async fn load(&self) -> PersistedCountdownState {
        match self.store.get(COUNTDOWN_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "countdown state did not deserialize, using default");
                    PersistedCountdownState::default()
                }
            },
            Ok(None) => PersistedCountdownState::default(),
            Err(e) => {
                warn!(error = %e, "countdown state read failed, using default");
                PersistedCountdownState::default()
            }
        }
    }

    /// Replace the persisted state wholesale.
    pub async fn save(&self, state: &PersistedCountdownState) -> Result<(), StorageError> {
        let value = serde_json::to_value(state).map_err(|e| StorageError::WriteFailed {
            key: COUNTDOWN_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(COUNTDOWN_KEY, value).await
    }
}
