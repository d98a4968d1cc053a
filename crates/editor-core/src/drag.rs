//! The transient state of a field being dragged.

use rateposter_model::{FieldId, Position};

/// Exists only between a pointer-down that hit a field and the matching
/// pointer-up or pointer-leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// The field being repositioned.
    pub field: FieldId,

    /// Last clamped pointer position, `None` until the pointer first moves.
    pub live: Option<Position>,
}

impl DragSession {
    pub fn begin(field: FieldId) -> Self {
        Self { field, live: None }
    }

    /// Record a pointer move and return the clamped position.
    pub fn update(&mut self, x: f64, y: f64) -> Position {
        let position = Position::new(x, y);
        self.live = Some(position);
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_clamps_and_records() {
        let mut drag = DragSession::begin(FieldId::Currency);
        assert!(drag.live.is_none());
        let pos = drag.update(120.0, -3.0);
        assert_eq!(pos, Position::new(100.0, 0.0));
        assert_eq!(drag.live, Some(pos));
    }
}
