use std::sync::Arc;

use taskly_core::history::{HistoryLog, EMPTY_HISTORY_PLACEHOLDER};
use taskly_core::storage::{KeyValueStore, SqliteStore};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open()?);
    let log = HistoryLog::new(store);

    let timestamps = log.load().await;
    if timestamps.is_empty() {
        println!("{EMPTY_HISTORY_PLACEHOLDER}");
        return Ok(());
    }
    for entry in HistoryLog::entries(&timestamps) {
        println!("{entry}");
    }
    Ok(())
}
