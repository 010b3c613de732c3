mod kv;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

/// Returns `~/.config/taskly[-dev]/` based on TASKLY_ENV.
///
/// Set TASKLY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKLY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("taskly-dev")
    } else {
        base_dir.join("taskly")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
