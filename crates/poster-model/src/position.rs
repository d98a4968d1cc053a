//! Percent-based positions and the preview rectangle they are measured in.
//!
//! `(0.0, 0.0)` is the top-left of the source image, `(100.0, 100.0)` the
//! bottom-right.

use serde::Serialize;

/// Upper bound of a percentage coordinate.
pub const PERCENT_MAX: f64 = 100.0;

/// A field anchor in percent of the image width/height.
///
/// Both axes are always within `[0, 100]`; every constructor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a position, clamping both axes to `[0, 100]`.
    /// Non-finite input collapses to `0`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Scale to pixel coordinates of a `width` x `height` surface.
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (
            (self.x / PERCENT_MAX * width as f64) as f32,
            (self.y / PERCENT_MAX * height as f64) as f32,
        )
    }

    /// Whether `(px, py)` lies strictly within `tolerance` percentage points
    /// of this position on both axes.
    pub fn within(&self, px: f64, py: f64, tolerance: f64) -> bool {
        (self.x - px).abs() < tolerance && (self.y - py).abs() < tolerance
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, PERCENT_MAX)
    } else {
        0.0
    }
}

/// The on-screen rectangle a preview of the poster occupies.
///
/// Pointer coordinates arrive in the same space (window pixels) and are
/// converted to percentages of this rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a pointer location to percentages of this rectangle, unclamped.
    ///
    /// Returns `None` for a degenerate (zero-sized) rectangle.
    pub fn to_percent(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some((
            (px - self.left) / self.width * PERCENT_MAX,
            (py - self.top) / self.height * PERCENT_MAX,
        ))
    }

    /// Map a pointer location to a clamped [`Position`].
    pub fn to_position(&self, px: f64, py: f64) -> Option<Position> {
        self.to_percent(px, py).map(|(x, y)| Position::new(x, y))
    }

    /// Whether a pointer location is inside the rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.left
            && px <= self.left + self.width
            && py >= self.top
            && py <= self.top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_clamps_both_axes() {
        let p = Position::new(-12.0, 140.0);
        assert_eq!(p.x(), 0.0);
        assert_eq!(p.y(), 100.0);

        let nan = Position::new(f64::NAN, f64::INFINITY);
        assert_eq!((nan.x(), nan.y()), (0.0, 0.0));
    }

    #[test]
    fn test_to_pixels() {
        let p = Position::new(50.0, 25.0);
        assert_eq!(p.to_pixels(800, 400), (400.0, 100.0));
    }

    #[test]
    fn test_within_is_strict() {
        let p = Position::new(50.0, 50.0);
        assert!(p.within(54.9, 45.1, 5.0));
        assert!(!p.within(55.0, 50.0, 5.0));
        assert!(!p.within(50.0, 44.0, 5.0));
    }

    #[test]
    fn test_canvas_rect_to_percent() {
        let rect = CanvasRect::new(100.0, 50.0, 400.0, 200.0);
        let (x, y) = rect.to_percent(300.0, 100.0).unwrap();
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 25.0).abs() < 1e-9);

        let (x, _) = rect.to_percent(0.0, 100.0).unwrap();
        assert!(x < 0.0);
        assert_eq!(rect.to_position(0.0, 100.0).unwrap().x(), 0.0);
    }

    #[test]
    fn test_degenerate_rect() {
        let rect = CanvasRect::new(0.0, 0.0, 0.0, 10.0);
        assert!(rect.to_percent(1.0, 1.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_position_always_in_range(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
            let p = Position::new(x, y);
            prop_assert!((0.0..=100.0).contains(&p.x()));
            prop_assert!((0.0..=100.0).contains(&p.y()));
            prop_assert_eq!(p.x(), x.clamp(0.0, 100.0));
            prop_assert_eq!(p.y(), y.clamp(0.0, 100.0));
        }
    }
}
