//! Clock-driven refresh of the derived date and time fields.
//!
//! Instead of free-running timers, the schedule compares each tick against
//! the minute and calendar date of the last derivation. Time fields refresh
//! on every minute change; date fields refresh whenever the local date
//! changes, so a poster left open across midnight never shows yesterday.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Which derivations a tick calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshDue {
    /// Re-derive the time-of-day fields.
    pub time: bool,
    /// Re-derive the date fields.
    pub date: bool,
}

impl RefreshDue {
    pub fn any(&self) -> bool {
        self.time || self.date
    }
}

/// Tracks when date and time fields were last derived.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    last_minute: (NaiveDate, u32, u32),
    last_date: NaiveDate,
}

impl RefreshSchedule {
    /// Start a schedule whose fields were derived at `derived_at`.
    pub fn new(derived_at: NaiveDateTime) -> Self {
        Self {
            last_minute: minute_key(derived_at),
            last_date: derived_at.date(),
        }
    }

    /// Check whether a refresh is due at `now` and, if so, mark it done.
    pub fn poll(&mut self, now: NaiveDateTime) -> RefreshDue {
        let minute = minute_key(now);
        let due = RefreshDue {
            time: minute != self.last_minute,
            date: now.date() != self.last_date,
        };
        if due.time {
            self.last_minute = minute;
        }
        if due.date {
            self.last_date = now.date();
        }
        due
    }
}

fn minute_key(at: NaiveDateTime) -> (NaiveDate, u32, u32) {
    (at.date(), at.hour(), at.minute())
}
