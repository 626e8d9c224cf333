use chrono::{DateTime, Local, NaiveDate, Utc};

/// Time authority for the timer: wall-clock instants and the calendar date
/// that daily buckets are keyed by. Injected so day rollover and the grace
/// window are deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The device-local calendar date; this is the bucket key.
    fn today(&self) -> NaiveDate;
}

/// Production clock: UTC instants, local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
