//! Time keeping module for PineTime

use core::sync::atomic::{AtomicBool, Ordering};

use chrono::{Duration as ChronoDuration, NaiveDateTime, Timelike};
use embassy_time::{Duration, Instant};

use pixel_mosaic::{TimeSnapshot, TimeSource};

/// Set while the face wants minute ticks
static MINUTE_TICKS: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Local time `timestamp` seconds after the epoch, taken as the current time
    pub fn from_timestamp(timestamp: i64) -> Self {
        let time = NaiveDateTime::from_timestamp_opt(timestamp, 0).unwrap_or_else(|| {
            defmt::warn!("Timestamp {} out of range, starting at the epoch", timestamp);
            NaiveDateTime::UNIX_EPOCH
        });

        Self {
            time,
            instant: Instant::now(),
        }
    }
}

/// Wall clock advanced by the RTC
#[derive(Clone, Copy)]
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Start the clock at `reference`
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference
            .time
            .checked_add_signed(ChronoDuration::microseconds(elapsed.as_micros() as i64))
            .unwrap_or(self.reference.time)
    }

    /// Time left until the minute changes
    pub fn until_next_minute(&self) -> Duration {
        let now = self.get_time();
        let elapsed_ms = u64::from(now.second()) * 1_000 + u64::from(now.nanosecond() / 1_000_000);
        Duration::from_millis(60_000 - elapsed_ms.min(59_999))
    }

    /// Whether minute ticks should be delivered
    pub fn ticks_subscribed() -> bool {
        MINUTE_TICKS.load(Ordering::Relaxed)
    }
}

impl TimeSource for TimeManager {
    fn now(&self) -> TimeSnapshot {
        TimeSnapshot::from_time(&self.get_time())
    }

    fn subscribe_minutes(&mut self) {
        MINUTE_TICKS.store(true, Ordering::Relaxed);
    }

    fn unsubscribe(&mut self) {
        MINUTE_TICKS.store(false, Ordering::Relaxed);
    }
}
