//! Core error types for taskly-core.
//!
//! One thiserror hierarchy shared across the library. Failures at the
//! storage and notification boundaries get their own enums so callers can
//! apply different policies (surface vs. log-and-ignore).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskly-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Notification-related errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Write for a specific key failed
    #[error("Write failed for key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// IO errors while resolving or creating the data directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Notification-specific errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Permission request could not be completed
    #[error("Permission request failed: {0}")]
    PermissionRequestFailed(String),

    /// Scheduling the one-shot notification failed
    #[error("Failed to schedule notification: {0}")]
    ScheduleFailed(String),

    /// Cancelling a previously scheduled notification failed
    #[error("Failed to cancel notification '{id}': {message}")]
    CancelFailed { id: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to resolve the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
