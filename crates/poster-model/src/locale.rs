//! Khmer and English date/time derivation.
//!
//! Every function takes the local time as an argument; nothing here reads
//! the system clock.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

/// Khmer digits ០ through ៩, indexed by value.
pub const KHMER_DIGITS: [char; 10] = ['០', '១', '២', '៣', '៤', '៥', '៦', '៧', '៨', '៩'];

/// Khmer month names, January first.
pub const KHMER_MONTHS: [&str; 12] = [
    "មករា",
    "កុម្ភៈ",
    "មីនា",
    "មេសា",
    "ឧសភា",
    "មិថុនា",
    "កក្កដា",
    "សីហា",
    "កញ្ញា",
    "តុលា",
    "វិច្ឆិកា",
    "ធ្នូ",
];

/// English month names, January first.
pub const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Replace ASCII digits with Khmer digits, leaving everything else intact.
pub fn to_khmer_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => KHMER_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Four-way bucketing of the hour used by the Khmer period label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// `[05:00, 12:00)`
    Morning,
    /// `[12:00, 17:00)`
    Afternoon,
    /// `[17:00, 21:00)`
    Evening,
    /// Everything else.
    Night,
}

impl DayPeriod {
    /// Bucket a 24-hour clock hour.
    pub fn from_hour(hour24: u32) -> Self {
        match hour24 {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn khmer_label(self) -> &'static str {
        match self {
            Self::Morning => "ព្រឹក",
            Self::Afternoon => "រសៀល",
            Self::Evening => "ល្ងាច",
            Self::Night => "យប់",
        }
    }

    pub fn english_label(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

/// AM/PM marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Convert a 24-hour clock hour to the 12-hour clock (`0` becomes `12`).
pub fn to_12_hour(hour24: u32) -> (u32, Meridiem) {
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hour24 >= 12 {
        Meridiem::Pm
    } else {
        Meridiem::Am
    };
    (hour12, meridiem)
}

/// Date-derived field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateFields {
    pub khmer_day: String,
    pub khmer_month: String,
    pub khmer_year: String,
    pub english_day: String,
    pub english_month: String,
    pub english_year: String,
    pub period: DayPeriod,
}

/// Time-of-day field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFields {
    /// `h:mm` in Khmer digits, hour unpadded.
    pub khmer_time: String,
    /// `hh:mm AM` in Western digits.
    pub english_time: String,
    pub period: DayPeriod,
}

/// Derive the date fields for `now`.
pub fn derive_date_fields(now: NaiveDateTime) -> DateFields {
    let month_index = now.month0() as usize;
    DateFields {
        khmer_day: to_khmer_digits(&now.day().to_string()),
        khmer_month: KHMER_MONTHS[month_index].to_string(),
        khmer_year: to_khmer_digits(&now.year().to_string()),
        english_day: now.day().to_string(),
        english_month: ENGLISH_MONTHS[month_index].to_string(),
        english_year: now.year().to_string(),
        period: DayPeriod::from_hour(now.hour()),
    }
}

/// Derive the time-of-day fields for `now`.
pub fn derive_time_fields(now: NaiveDateTime) -> TimeFields {
    let (hour12, meridiem) = to_12_hour(now.hour());
    let minutes = format!("{:02}", now.minute());
    TimeFields {
        khmer_time: format!(
            "{}:{}",
            to_khmer_digits(&hour12.to_string()),
            to_khmer_digits(&minutes)
        ),
        english_time: format!("{hour12:02}:{minutes} {}", meridiem.as_str()),
        period: DayPeriod::from_hour(now.hour()),
    }
}
