//! # Taskly Core Library
//!
//! Core business logic for Taskly: a recurring countdown/reminder with a
//! completion history, plus a persistent shopping list. The UI shell (the
//! CLI binary, or a mobile screen) is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a wall-clock state machine driven by a
//!   caller-supplied clock; the display status is recomputed from the last
//!   persisted completion on every tick
//! - **History Log**: read-only projection of the persisted completion
//!   timestamps
//! - **Storage**: async JSON key-value boundary with a SQLite-backed
//!   implementation; every key has exactly one owning writer
//! - **Notifications**: one-shot reminder scheduling behind a port trait,
//!   with a stored-pending implementation for desktop builds
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: countdown state machine and "mark complete" transition
//! - [`HistoryLog`]: completion history read path
//! - [`KeyValueStore`]: persistence boundary
//! - [`NotificationScheduler`]: reminder scheduling boundary
//! - [`Config`]: application configuration

pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod history;
pub mod notify;
pub mod shopping;
pub mod storage;

pub use config::Config;
pub use countdown::{
    CompletionOutcome, CountdownEngine, CountdownStatus, CountdownStore,
    PersistedCountdownState, TickSubscription, TimeBreakdown,
};
pub use error::{ConfigError, CoreError, NotifyError, StorageError};
pub use events::Event;
pub use history::HistoryLog;
pub use notify::{NotificationScheduler, PermissionStatus, StoredScheduler};
pub use shopping::{ShoppingItem, ShoppingListStore};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
