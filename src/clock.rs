//! Local time source for the gamification engine
//!
//! All calendar logic (hour buckets, fixed dates, weekends, day-difference
//! streaks) goes through a single [`Clock`] so tests can pin the time.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, Timelike};

/// Source of "current local time".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Today's local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current local hour (0-23).
    fn hour(&self) -> u32 {
        self.now().hour()
    }

    /// Current Unix timestamp in milliseconds.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for deterministic tests.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().expect("clock lock") = now;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().expect("clock lock")
    }
}

/// Get today's date as YYYY-MM-DD string.
pub fn day_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Get the month-day portion as MM-DD string, used for fixed-date badges.
pub fn month_day_string(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advance() {
        let start = Local.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.hour(), 9);

        clock.advance(chrono::Duration::hours(3));
        assert_eq!(clock.hour(), 12);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn test_day_strings() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 23).unwrap();
        assert_eq!(day_string(date), "2026-04-23");
        assert_eq!(month_day_string(date), "04-23");
    }
}
