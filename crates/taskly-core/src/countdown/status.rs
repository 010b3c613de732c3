//! Pure countdown arithmetic.
//!
//! The display status is a function of the current time, the most recent
//! completion and the fixed recurrence interval -- nothing here touches
//! storage or the scheduler.

use serde::{Deserialize, Serialize};

/// Days/hours/minutes/seconds split of a duration, for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeBreakdown {
    /// Split a non-negative millisecond span into display units.
    /// Sub-second remainders are truncated.
    pub fn from_millis(ms: u64) -> Self {
        let total_secs = ms / 1000;
        Self {
            days: total_secs / 86_400,
            hours: (total_secs % 86_400) / 3_600,
            minutes: (total_secs % 3_600) / 60,
            seconds: total_secs % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Derived countdown view. Recomputed every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownStatus {
    pub is_overdue: bool,
    pub distance: TimeBreakdown,
}

/// Due time for the current cycle, in epoch milliseconds.
///
/// An empty history is treated as due right now (zero distance, not
/// overdue) rather than as a distinct "not started" state.
pub fn due_at_ms(now_ms: i64, last_completed_at_ms: Option<i64>, frequency_ms: i64) -> i64 {
    match last_completed_at_ms {
        Some(last) => last.saturating_add(frequency_ms),
        None => now_ms,
    }
}

impl CountdownStatus {
    /// Compute the display status at `now_ms`.
    ///
    /// The distance is the absolute gap between now and the due time, so
    /// it is non-negative whichever side of due we are on.
    pub fn at(now_ms: i64, last_completed_at_ms: Option<i64>, frequency_ms: i64) -> Self {
        let due = due_at_ms(now_ms, last_completed_at_ms, frequency_ms);
        Self {
            is_overdue: due < now_ms,
            distance: TimeBreakdown::from_millis(now_ms.abs_diff(due)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FREQUENCY_MS: i64 = 10_000;
    const T: i64 = 1_700_000_000_000;

    #[test]
    fn empty_history_is_due_now() {
        let status = CountdownStatus::at(T, None, FREQUENCY_MS);
        assert!(!status.is_overdue);
        assert!(status.distance.is_zero());
    }

    #[test]
    fn pending_distance_counts_down() {
        let status = CountdownStatus::at(T + 3_000, Some(T), FREQUENCY_MS);
        assert!(!status.is_overdue);
        assert_eq!(
            status.distance,
            TimeBreakdown { days: 0, hours: 0, minutes: 0, seconds: 7 }
        );
    }

    #[test]
    fn five_seconds_overdue() {
        let status = CountdownStatus::at(T + 15_000, Some(T), FREQUENCY_MS);
        assert!(status.is_overdue);
        assert_eq!(
            status.distance,
            TimeBreakdown { days: 0, hours: 0, minutes: 0, seconds: 5 }
        );
    }

    #[test]
    fn exactly_due_is_not_overdue() {
        let status = CountdownStatus::at(T + FREQUENCY_MS, Some(T), FREQUENCY_MS);
        assert!(!status.is_overdue);
        assert!(status.distance.is_zero());
    }

    #[test]
    fn breakdown_carries_units() {
        let ms = ((2 * 86_400 + 3 * 3_600 + 4 * 60 + 5) * 1_000 + 999) as u64;
        assert_eq!(
            TimeBreakdown::from_millis(ms),
            TimeBreakdown { days: 2, hours: 3, minutes: 4, seconds: 5 }
        );
    }

    proptest! {
        #[test]
        fn overdue_iff_past_due(last in 0i64..4_102_444_800_000, offset in 0i64..1_000_000_000_000) {
            let now = last + offset;
            let status = CountdownStatus::at(now, Some(last), FREQUENCY_MS);
            prop_assert_eq!(status.is_overdue, last + FREQUENCY_MS < now);
        }

        #[test]
        fn distance_is_absolute_gap(last in 0i64..4_102_444_800_000, offset in 0i64..1_000_000_000_000) {
            let now = last + offset;
            let due = last + FREQUENCY_MS;
            let status = CountdownStatus::at(now, Some(last), FREQUENCY_MS);
            prop_assert_eq!(status.distance, TimeBreakdown::from_millis(now.abs_diff(due)));
        }
    }
}
