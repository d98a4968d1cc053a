//! Pointer hit-testing against field anchors.

use rateposter_model::{FieldId, Poster};

/// Maximum distance, in percentage points per axis, between the pointer and a
/// field's anchor for the field to be picked.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Return the first field, in enumeration order, whose anchor lies strictly
/// within [`HIT_TOLERANCE`] of `(x, y)` on both axes.
///
/// `x` and `y` are percentages of the canvas and may fall outside
/// `[0, 100]` when the pointer is near an edge.
pub fn hit_test(poster: &Poster, x: f64, y: f64) -> Option<FieldId> {
    poster
        .iter()
        .find(|(_, state)| state.position.within(x, y, HIT_TOLERANCE))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rateposter_model::Position;

    fn poster() -> Poster {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Poster::new(now)
    }

    #[test]
    fn test_hits_default_anchor() {
        let p = poster();
        assert_eq!(hit_test(&p, 48.0, 66.0), Some(FieldId::BuyingRate));
        assert_eq!(hit_test(&p, 18.0, 62.0), Some(FieldId::Currency));
    }

    #[test]
    fn test_miss_returns_none() {
        let p = poster();
        assert_eq!(hit_test(&p, 5.0, 5.0), None);
        assert_eq!(hit_test(&p, 95.0, 95.0), None);
    }

    #[test]
    fn test_earlier_field_wins_overlap() {
        let mut p = poster();
        p.set_position(FieldId::SellingRate, Position::new(20.0, 20.0));
        p.set_position(FieldId::Month, Position::new(21.0, 21.0));
        assert_eq!(hit_test(&p, 20.5, 20.5), Some(FieldId::Month));
    }

    #[test]
    fn test_default_layout_overlap_prefers_day_over_english_date() {
        // Day (23.94, 38.80) and EnglishDate (32.58, 42.45) are ~8.6 apart
        // horizontally; a point between them within 5 of both picks Day.
        let p = poster();
        assert_eq!(hit_test(&p, 28.5, 40.5), Some(FieldId::Day));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let mut p = poster();
        for id in FieldId::ALL {
            p.set_position(id, Position::new(90.0, 10.0));
        }
        p.set_position(FieldId::Day, Position::new(50.0, 50.0));
        assert_eq!(hit_test(&p, 55.0, 50.0), None);
        assert_eq!(hit_test(&p, 54.99, 50.0), Some(FieldId::Day));
    }
}
