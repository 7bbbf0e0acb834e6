//! Clock - injected "now" source
//!
//! Every component that stamps timestamps or checks training currency takes
//! a `Clock` rather than calling `Utc::now()` directly, so eligibility
//! boundaries and history ordering are testable with a pinned time.

use chrono::{DateTime, NaiveDate, Utc};

/// A monotonic "now" source.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock pinned to a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to midnight UTC on the given date
    pub fn at_date(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid calendar date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time");
        Self(date.and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_clock_is_pinned() {
        let clock = FixedClock::at_date(2025, 3, 1);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
