//! Time source used by the membership and scheduling rules.
//!
//! All calendar math works on the local calendar day. Timestamps are stored
//! in UTC and converted with [`local_day`].

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" for services.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar day (time-of-day discarded)
    fn today(&self) -> NaiveDate {
        local_day(self.now())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Local calendar day of a stored timestamp.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}
