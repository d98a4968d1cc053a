//! The ten overlay fields and their per-field state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::position::Position;

/// Identifier of one of the ten overlay slots.
///
/// The declaration order is the fixed enumeration order: it decides both the
/// drawing order and which field wins a hit-test when several overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    Day,
    Month,
    Year,
    EnglishDate,
    EnglishTime,
    KhmerTime,
    KhmerPeriod,
    Currency,
    BuyingRate,
    SellingRate,
}

/// Number of overlay fields.
pub const FIELD_COUNT: usize = 10;

impl FieldId {
    /// All fields in enumeration order.
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::Day,
        FieldId::Month,
        FieldId::Year,
        FieldId::EnglishDate,
        FieldId::EnglishTime,
        FieldId::KhmerTime,
        FieldId::KhmerPeriod,
        FieldId::Currency,
        FieldId::BuyingRate,
        FieldId::SellingRate,
    ];

    /// Position in [`FieldId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable kebab-case key, accepted back by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
            Self::EnglishDate => "english-date",
            Self::EnglishTime => "english-time",
            Self::KhmerTime => "khmer-time",
            Self::KhmerPeriod => "khmer-period",
            Self::Currency => "currency",
            Self::BuyingRate => "buying-rate",
            Self::SellingRate => "selling-rate",
        }
    }

    /// Human-readable label for control panels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::EnglishDate => "English Date",
            Self::EnglishTime => "Time (English)",
            Self::KhmerTime => "Time (Khmer)",
            Self::KhmerPeriod => "Khmer Period",
            Self::Currency => "Currency",
            Self::BuyingRate => "Buying Rate",
            Self::SellingRate => "Selling Rate",
        }
    }

    /// Allowed font size range in pixels.
    pub fn size_range(self) -> SizeRange {
        match self {
            Self::Currency => SizeRange::new(10, 150),
            Self::BuyingRate | Self::SellingRate => SizeRange::new(20, 200),
            _ => SizeRange::new(10, 100),
        }
    }

    /// Initial font size in pixels.
    pub fn default_size(self) -> u32 {
        match self {
            Self::KhmerTime => 30,
            Self::Currency => 48,
            Self::BuyingRate | Self::SellingRate => 100,
            _ => 32,
        }
    }

    /// Initial anchor position.
    pub fn default_position(self) -> Position {
        let (x, y) = match self {
            Self::Day => (23.94, 38.80),
            Self::Month => (34.24, 39.13),
            Self::Year => (50.0, 48.0),
            Self::EnglishDate => (32.58, 42.45),
            Self::EnglishTime => (80.65, 42.34),
            Self::KhmerTime => (78.19, 39.06),
            Self::KhmerPeriod => (88.86, 38.83),
            Self::Currency => (18.0, 62.0),
            Self::BuyingRate => (48.70, 65.06),
            Self::SellingRate => (79.45, 64.56),
        };
        Position::new(x, y)
    }

    /// Whether the displayed value gets thousands separators.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::BuyingRate | Self::SellingRate)
    }

    /// Whether the field is rewritten by the per-minute time refresh.
    pub fn is_time_of_day(self) -> bool {
        matches!(self, Self::EnglishTime | Self::KhmerTime | Self::KhmerPeriod)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected one of: day, month, year, english-date, english-time, khmer-time, khmer-period, currency, buying-rate, selling-rate)")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FieldId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Inclusive font size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, px: u32) -> u32 {
        px.clamp(self.min, self.max)
    }
}

/// One of the three editable parts of the English date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Month,
    Day,
    Year,
}

/// Sub-values of the composite English date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateParts {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl DateParts {
    pub fn get(&self, part: DatePart) -> &str {
        match part {
            DatePart::Month => &self.month,
            DatePart::Day => &self.day,
            DatePart::Year => &self.year,
        }
    }

    pub fn set(&mut self, part: DatePart, value: String) {
        match part {
            DatePart::Month => self.month = value,
            DatePart::Day => self.day = value,
            DatePart::Year => self.year = value,
        }
    }

    /// Rendered form, `"Month, Day, Year"`.
    pub fn joined(&self) -> String {
        format!("{}, {}, {}", self.month, self.day, self.year)
    }

    /// Split `"Month, Day, Year"` back into parts.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [month, day, year] => Some(Self {
                month: month.to_string(),
                day: day.to_string(),
                year: year.to_string(),
            }),
            _ => None,
        }
    }
}

/// What a field displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldContent {
    Text(String),
    Date(DateParts),
}

/// Mutable state of a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    pub content: FieldContent,
    pub position: Position,
    size: u32,
}

impl FieldState {
    /// Fresh state for `id` at its default position and size.
    pub fn new(id: FieldId, content: FieldContent) -> Self {
        Self {
            content,
            position: id.default_position(),
            size: id.default_size(),
        }
    }

    /// Font size in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Set the font size, clamped to `range`.
    pub fn set_size(&mut self, px: u32, range: SizeRange) {
        self.size = range.clamp(px);
    }
}
