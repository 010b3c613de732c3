//! The 1 Hz display clock as a scoped resource.
//!
//! The recomputation tick is owned by whoever holds the subscription:
//! dropping the handle aborts the underlying task, so an unmounted view
//! cannot leak a timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Repeating wake-up for countdown recomputation.
pub struct TickSubscription {
    rx: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

impl TickSubscription {
    /// Display refresh cadence.
    pub const DISPLAY_PERIOD: Duration = Duration::from_secs(1);

    /// Start ticking at `period`. The first tick fires immediately.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Wait for the next tick. Returns `None` once the subscription has
    /// been torn down.
    pub async fn tick(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}

impl Drop for TickSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_repeated_ticks() {
        let mut ticks = TickSubscription::start(Duration::from_millis(5));
        assert!(ticks.tick().await.is_some());
        assert!(ticks.tick().await.is_some());
        assert!(ticks.tick().await.is_some());
    }

    #[tokio::test]
    async fn drop_aborts_the_task() {
        let ticks = TickSubscription::start(Duration::from_millis(5));
        let task_handle = ticks.task.abort_handle();
        drop(ticks);
        for _ in 0..100 {
            if task_handle.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert!(task_handle.is_finished());
    }
}
