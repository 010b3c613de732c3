use std::sync::Arc;

use chrono::Utc;
use clap::Subcommand;
use taskly_core::config::Config;
use taskly_core::countdown::{CountdownEngine, CountdownStore, TickSubscription};
use taskly_core::notify::{NotificationScheduler, PendingNotification, StoredScheduler};
use taskly_core::storage::{KeyValueStore, SqliteStore};

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Print the current countdown status as JSON
    Status,
    /// Mark the recurring task done and schedule the next reminder
    Complete,
    /// Re-render the countdown once per second and deliver due reminders
    Watch,
}

pub async fn run(action: CountdownAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open()?);
    let scheduler = Arc::new(StoredScheduler::new(Arc::clone(&store)));
    let mut engine = CountdownEngine::load(
        CountdownStore::new(Arc::clone(&store)),
        Arc::clone(&scheduler) as Arc<dyn NotificationScheduler>,
        &config.countdown,
    )
    .await;

    match action {
        CountdownAction::Status => {
            let snapshot = engine.snapshot(Utc::now().timestamp_millis());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        CountdownAction::Complete => {
            let outcome = engine.complete(Utc::now().timestamp_millis()).await?;
            for event in &outcome.events {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
            if let Some(warning) = outcome.warning {
                eprintln!("warning: {warning}");
            }
        }
        CountdownAction::Watch => watch(&engine, &scheduler, &config).await?,
    }

    Ok(())
}

/// Runs until interrupted. The tick subscription dies with this scope, so
/// no timer survives the command.
async fn watch(
    engine: &CountdownEngine,
    scheduler: &StoredScheduler,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticks = TickSubscription::start(TickSubscription::DISPLAY_PERIOD);
    while ticks.tick().await.is_some() {
        let now_ms = Utc::now().timestamp_millis();
        let status = engine.status(now_ms);
        let d = status.distance;
        let heading = if status.is_overdue {
            "Thing overdue by"
        } else {
            "Thing due in"
        };
        println!(
            "{heading} {}d {:02}h {:02}m {:02}s",
            d.days, d.hours, d.minutes, d.seconds
        );

        if config.notifications.enabled {
            for due in scheduler.take_due(now_ms).await? {
                deliver(&due);
            }
        }
    }
    Ok(())
}

fn deliver(pending: &PendingNotification) {
    if let Err(e) = notify_rust::Notification::new()
        .summary(&pending.title)
        .show()
    {
        tracing::warn!(error = %e, "failed to show desktop notification");
    }
}
