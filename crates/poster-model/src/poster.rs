//! The poster: every field's state plus the shared style.

use std::ops::{Index, IndexMut};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::field::{DatePart, DateParts, FieldContent, FieldId, FieldState, FIELD_COUNT};
use crate::locale::{derive_date_fields, derive_time_fields, DateFields, TimeFields};
use crate::numfmt::format_thousands;
use crate::position::Position;
use crate::style::Style;

/// Placeholder buying rate shown before the user types one.
pub const DEFAULT_BUYING_RATE: &str = "4,021";

/// Placeholder selling rate shown before the user types one.
pub const DEFAULT_SELLING_RATE: &str = "4,030";

/// Total mapping from [`FieldId`] to [`FieldState`].
///
/// Backed by an array indexed by enumeration order, so every id always has a
/// state and iteration follows [`FieldId::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMap {
    states: [FieldState; FIELD_COUNT],
}

impl FieldMap {
    /// Build the map by asking `init` for each field in order.
    pub fn from_fn(mut init: impl FnMut(FieldId) -> FieldState) -> Self {
        Self {
            states: FieldId::ALL.map(&mut init),
        }
    }

    /// Iterate `(id, state)` in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldState)> {
        FieldId::ALL.into_iter().zip(self.states.iter())
    }
}

impl Index<FieldId> for FieldMap {
    type Output = FieldState;

    fn index(&self, id: FieldId) -> &FieldState {
        &self.states[id.index()]
    }
}

impl IndexMut<FieldId> for FieldMap {
    fn index_mut(&mut self, id: FieldId) -> &mut FieldState {
        &mut self.states[id.index()]
    }
}

/// Everything drawn on top of the source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poster {
    fields: FieldMap,
    pub style: Style,
}

impl Poster {
    /// A poster with clock-derived dates/times, static placeholders, default
    /// positions and sizes, and the default style.
    pub fn new(now: NaiveDateTime) -> Self {
        Self::with_style(now, Style::default())
    }

    /// Like [`Poster::new`] with an explicit shared style.
    pub fn with_style(now: NaiveDateTime, style: Style) -> Self {
        let fields = FieldMap::from_fn(|id| {
            let content = match id {
                FieldId::EnglishDate => FieldContent::Date(DateParts::default()),
                FieldId::BuyingRate => FieldContent::Text(DEFAULT_BUYING_RATE.to_string()),
                FieldId::SellingRate => FieldContent::Text(DEFAULT_SELLING_RATE.to_string()),
                _ => FieldContent::Text(String::new()),
            };
            FieldState::new(id, content)
        });

        let mut poster = Self { fields, style };
        poster.apply_date(&derive_date_fields(now));
        poster.apply_time(&derive_time_fields(now));
        poster
    }

    pub fn field(&self, id: FieldId) -> &FieldState {
        &self.fields[id]
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Iterate `(id, state)` in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldState)> {
        self.fields.iter()
    }

    /// Replace a field's text.
    ///
    /// For [`FieldId::EnglishDate`], `"Month, Day, Year"` is split into its
    /// three parts; anything else is shown verbatim until the next date
    /// refresh.
    pub fn set_text(&mut self, id: FieldId, text: impl Into<String>) {
        let text = text.into();
        self.fields[id].content = match id {
            FieldId::EnglishDate => match DateParts::parse(&text) {
                Some(parts) => FieldContent::Date(parts),
                None => FieldContent::Text(text),
            },
            _ => FieldContent::Text(text),
        };
    }

    /// Replace one part of the English date.
    pub fn set_date_part(&mut self, part: DatePart, value: impl Into<String>) {
        let content = &mut self.fields[FieldId::EnglishDate].content;
        match content {
            FieldContent::Date(parts) => parts.set(part, value.into()),
            FieldContent::Text(_) => {
                let mut parts = DateParts::default();
                parts.set(part, value.into());
                *content = FieldContent::Date(parts);
            }
        }
    }

    /// The English date parts, if the field currently holds them.
    pub fn date_parts(&self) -> Option<&DateParts> {
        match &self.fields[FieldId::EnglishDate].content {
            FieldContent::Date(parts) => Some(parts),
            FieldContent::Text(_) => None,
        }
    }

    /// Raw (unformatted) text of a field as the user typed it.
    pub fn raw_text(&self, id: FieldId) -> String {
        match &self.fields[id].content {
            FieldContent::Text(text) => text.clone(),
            FieldContent::Date(parts) => parts.joined(),
        }
    }

    /// The string drawn on the poster for `id`.
    pub fn display_text(&self, id: FieldId) -> String {
        let raw = self.raw_text(id);
        if id.is_numeric() {
            format_thousands(&raw)
        } else {
            raw
        }
    }

    pub fn position(&self, id: FieldId) -> Position {
        self.fields[id].position
    }

    pub fn set_position(&mut self, id: FieldId, position: Position) {
        self.fields[id].position = position;
    }

    pub fn size(&self, id: FieldId) -> u32 {
        self.fields[id].size()
    }

    /// Set a field's font size, clamped to that field's range.
    pub fn set_size(&mut self, id: FieldId, px: u32) {
        self.fields[id].set_size(px, id.size_range());
    }

    /// Overwrite the date-derived fields and the period label.
    pub fn apply_date(&mut self, date: &DateFields) {
        self.set_text(FieldId::Day, date.khmer_day.clone());
        self.set_text(FieldId::Month, date.khmer_month.clone());
        self.set_text(FieldId::Year, date.khmer_year.clone());
        self.fields[FieldId::EnglishDate].content = FieldContent::Date(DateParts {
            month: date.english_month.clone(),
            day: date.english_day.clone(),
            year: date.english_year.clone(),
        });
        self.set_text(FieldId::KhmerPeriod, date.period.khmer_label());
    }

    /// Overwrite the time-of-day fields only.
    pub fn apply_time(&mut self, time: &TimeFields) {
        self.set_text(FieldId::KhmerTime, time.khmer_time.clone());
        self.set_text(FieldId::EnglishTime, time.english_time.clone());
        self.set_text(FieldId::KhmerPeriod, time.period.khmer_label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_poster_defaults() {
        let poster = Poster::new(at(16, 14, 7));
        assert_eq!(poster.raw_text(FieldId::Day), "១៦");
        assert_eq!(poster.raw_text(FieldId::Month), "តុលា");
        assert_eq!(poster.raw_text(FieldId::Year), "២០២៦");
        assert_eq!(poster.display_text(FieldId::EnglishDate), "October, 16, 2026");
        assert_eq!(poster.raw_text(FieldId::EnglishTime), "02:07 PM");
        assert_eq!(poster.raw_text(FieldId::KhmerTime), "២:០៧");
        assert_eq!(poster.raw_text(FieldId::KhmerPeriod), "រសៀល");
        assert_eq!(poster.raw_text(FieldId::Currency), "");
        assert_eq!(poster.display_text(FieldId::BuyingRate), "4,021");
        assert_eq!(poster.display_text(FieldId::SellingRate), "4,030");
        assert_eq!(poster.style, Style::default());
        assert_eq!(poster.size(FieldId::BuyingRate), 100);
        assert_eq!(poster.position(FieldId::Year), Position::new(50.0, 48.0));
    }

    #[test]
    fn test_numeric_fields_are_grouped_for_display() {
        let mut poster = Poster::new(at(16, 9, 0));
        poster.set_text(FieldId::BuyingRate, "1234567");
        poster.set_text(FieldId::Currency, "12345");
        assert_eq!(poster.raw_text(FieldId::BuyingRate), "1234567");
        assert_eq!(poster.display_text(FieldId::BuyingRate), "1,234,567");
        assert_eq!(poster.display_text(FieldId::Currency), "12345");
    }

    #[test]
    fn test_english_date_parts_edit_independently() {
        let mut poster = Poster::new(at(16, 9, 0));
        poster.set_date_part(DatePart::Day, "17");
        assert_eq!(poster.display_text(FieldId::EnglishDate), "October, 17, 2026");

        poster.set_text(FieldId::EnglishDate, "Sunday");
        assert!(poster.date_parts().is_none());
        assert_eq!(poster.display_text(FieldId::EnglishDate), "Sunday");

        poster.set_text(FieldId::EnglishDate, "May, 1, 2027");
        assert_eq!(poster.date_parts().unwrap().year, "2027");
    }

    #[test]
    fn test_apply_time_leaves_date_untouched() {
        let mut poster = Poster::new(at(16, 9, 0));
        poster.set_text(FieldId::Day, "custom");
        poster.apply_time(&derive_time_fields(at(17, 19, 30)));
        assert_eq!(poster.raw_text(FieldId::Day), "custom");
        assert_eq!(poster.raw_text(FieldId::EnglishTime), "07:30 PM");
        assert_eq!(poster.raw_text(FieldId::KhmerPeriod), "ល្ងាច");
    }

    #[test]
    fn test_apply_date_rewrites_date_fields() {
        let mut poster = Poster::new(at(16, 9, 0));
        poster.set_text(FieldId::Day, "custom");
        poster.apply_date(&derive_date_fields(at(17, 9, 0)));
        assert_eq!(poster.raw_text(FieldId::Day), "១៧");
        assert_eq!(poster.display_text(FieldId::EnglishDate), "October, 17, 2026");
    }

    #[test]
    fn test_size_setter_clamps_to_field_range() {
        let mut poster = Poster::new(at(16, 9, 0));
        poster.set_size(FieldId::Day, 500);
        assert_eq!(poster.size(FieldId::Day), 100);
        poster.set_size(FieldId::Currency, 140);
        assert_eq!(poster.size(FieldId::Currency), 140);
    }

    #[test]
    fn test_iteration_follows_enumeration_order() {
        let poster = Poster::new(at(16, 9, 0));
        let ids: Vec<FieldId> = poster.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, FieldId::ALL.to_vec());
    }
}
