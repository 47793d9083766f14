//! Time source abstraction.
//!
//! # Responsibility
//! - Provide epoch-millisecond "now" to state transitions and timers.
//! - Let tests and demos drive virtual time deterministically.
//! - Resolve instants to the user's wall-clock time for greeting and "today".

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of the current instant in Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    /// Moves time forward by `by` and returns the new instant.
    pub fn advance(&self, by: Duration) -> i64 {
        self.advance_ms(by.as_millis() as i64)
    }

    pub fn advance_ms(&self, by_ms: i64) -> i64 {
        self.now_ms.fetch_add(by_ms, Ordering::SeqCst) + by_ms
    }

    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Time zone used to read an instant as local wall-clock time.
///
/// `System` follows the device zone, DST included. `Fixed` pins an offset
/// for tests and demos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocalZone {
    #[default]
    System,
    Fixed(FixedOffset),
}

impl LocalZone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Fixed zone `minutes` east of UTC; `None` outside `-24h..=24h`.
    pub fn from_utc_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::Fixed)
    }

    /// Local date and time of `epoch_ms`.
    ///
    /// Instants outside chrono's range resolve as the Unix epoch.
    pub fn local_datetime(self, epoch_ms: i64) -> NaiveDateTime {
        let instant = DateTime::from_timestamp_millis(epoch_ms).unwrap_or_default();
        match self {
            Self::System => instant.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, LocalZone, ManualClock, SystemClock};
    use chrono::{DateTime, Datelike, Local, Timelike, Weekday};
    use std::time::Duration;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();
        assert_eq!(handle.advance(Duration::from_millis(250)), 1_250);
        assert_eq!(clock.now_ms(), 1_250);
        clock.set_ms(5);
        assert_eq!(handle.now_ms(), 5);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 0);
    }

    #[test]
    fn fixed_zone_shifts_hour_and_day() {
        // 2023-11-15T04:30:00Z
        let instant = 1_700_022_600_000;

        let utc = LocalZone::utc().local_datetime(instant);
        assert_eq!((utc.weekday(), utc.hour(), utc.minute()), (Weekday::Wed, 4, 30));

        let new_york = LocalZone::from_utc_offset_minutes(-5 * 60)
            .expect("valid offset")
            .local_datetime(instant);
        assert_eq!((new_york.weekday(), new_york.hour()), (Weekday::Tue, 23));
    }

    #[test]
    fn offsets_beyond_a_day_are_rejected() {
        assert!(LocalZone::from_utc_offset_minutes(24 * 60 + 1).is_none());
        assert!(LocalZone::from_utc_offset_minutes(i32::MAX).is_none());
        assert!(LocalZone::from_utc_offset_minutes(-90).is_some());
    }

    #[test]
    fn system_zone_follows_device_time_zone() {
        let instant = 1_700_022_600_000;
        let expected = DateTime::from_timestamp_millis(instant)
            .expect("in range")
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(LocalZone::System.local_datetime(instant), expected);
        assert_eq!(LocalZone::default(), LocalZone::System);
    }
}
