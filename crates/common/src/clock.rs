//! Wall-clock access.
//!
//! Every piece of date/time derivation takes the current local time as an
//! argument. Callers obtain it from a [`WallClock`], so production code reads
//! the system clock while tests pin a fixed instant.

use std::cell::Cell;

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};

/// Source of the current local wall-clock time.
pub trait WallClock {
    /// Current local date and time (no timezone attached).
    fn now(&self) -> NaiveDateTime;

    /// Current instant in UTC, used for export timestamps.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a known instant, advanced by hand.
///
/// The local time is treated as UTC for [`WallClock::now_utc`].
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now.get().and_utc()
    }
}

/// Parse a `YYYY-MM-DDTHH:MM[:SS]` local timestamp.
pub fn parse_local_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()
}
