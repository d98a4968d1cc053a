//! Poster compositor.
//!
//! Produces a bitmap at the source image's native resolution: the source
//! pixels, then every field's display text centred on its anchor, then (in
//! preview only) the drag guides for the field being moved.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use rateposter_editor::Editor;
use rateposter_model::{FieldId, Position, Poster, SourceImage};

use crate::fonts::FontBook;
use crate::text::draw_text_centered;

/// Guide line and marker colour.
pub const GUIDE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Guide line thickness in pixels.
pub const GUIDE_WIDTH: u32 = 2;
/// Length of each dash and of each gap.
pub const GUIDE_DASH: u32 = 5;
/// Radius of the filled anchor marker.
pub const MARKER_RADIUS: i32 = 8;

/// What to draw on top of the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw drag guides when a field is being dragged.
    pub guides: bool,
}

impl RenderOptions {
    /// Interactive preview: guides on.
    pub const PREVIEW: Self = Self { guides: true };
    /// Exported bitmap: never any guides.
    pub const EXPORT: Self = Self { guides: false };
}

/// Compose `poster` onto `image`.
///
/// `dragging` names the field under an active drag; it only matters when
/// `options.guides` is set. If no font can be resolved the text is skipped
/// and the source image is returned with guides only.
pub fn compose(
    poster: &Poster,
    image: &SourceImage,
    dragging: Option<FieldId>,
    fonts: &mut FontBook,
    options: RenderOptions,
) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut canvas = image.pixels().clone();

    if let Some(font) = fonts.resolve(&poster.style.font_family) {
        let color = Rgba(poster.style.text_color().to_rgba());
        for (id, state) in poster.iter() {
            let text = poster.display_text(id);
            if text.is_empty() {
                continue;
            }
            let anchor = state.position.to_pixels(width, height);
            if !draw_text_centered(&mut canvas, &font, &text, state.size() as f32, anchor, color) {
                tracing::debug!(field = %id, font = font.family(), "Text could not be drawn");
            }
        }
    }

    if options.guides {
        if let Some(field) = dragging {
            draw_guides(&mut canvas, poster.position(field));
        }
    }

    canvas
}

/// Dashed full-width and full-height lines through `at`, plus a filled marker.
pub fn draw_guides(canvas: &mut RgbaImage, at: Position) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let (px, py) = at.to_pixels(width, height);
    let (px, py) = (px.round() as i32, py.round() as i32);
    let half = (GUIDE_WIDTH / 2) as i32;

    let mut y = 0;
    while y < height {
        let len = GUIDE_DASH.min(height - y);
        draw_filled_rect_mut(
            canvas,
            Rect::at(px - half, y as i32).of_size(GUIDE_WIDTH, len),
            GUIDE_COLOR,
        );
        y += GUIDE_DASH * 2;
    }

    let mut x = 0;
    while x < width {
        let len = GUIDE_DASH.min(width - x);
        draw_filled_rect_mut(
            canvas,
            Rect::at(x as i32, py - half).of_size(len, GUIDE_WIDTH),
            GUIDE_COLOR,
        );
        x += GUIDE_DASH * 2;
    }

    draw_filled_circle_mut(canvas, (px, py), MARKER_RADIUS, GUIDE_COLOR);
}

/// Owns the font book so callers can compose repeatedly without reloading
/// system fonts.
pub struct Compositor {
    fonts: FontBook,
}

impl Compositor {
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    pub fn fonts(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    pub fn compose(
        &mut self,
        poster: &Poster,
        image: &SourceImage,
        dragging: Option<FieldId>,
        options: RenderOptions,
    ) -> RgbaImage {
        compose(poster, image, dragging, &mut self.fonts, options)
    }

    /// Preview of the editor's current state, with guides for an active drag.
    /// `None` until an image is loaded.
    pub fn preview(&mut self, editor: &Editor) -> Option<RgbaImage> {
        let image = editor.image()?;
        let dragging = editor.drag().map(|drag| drag.field);
        Some(self.compose(editor.poster(), image, dragging, RenderOptions::PREVIEW))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn poster() -> Poster {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Poster::new(now)
    }

    fn gray(w: u32, h: u32) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(w, h, Rgba([90, 90, 90, 255])))
    }

    #[test]
    fn test_output_matches_source_dimensions() {
        let out = compose(
            &poster(),
            &gray(123, 77),
            None,
            &mut FontBook::empty(),
            RenderOptions::EXPORT,
        );
        assert_eq!(out.dimensions(), (123, 77));
    }

    #[test]
    fn test_no_font_leaves_source_untouched() {
        let source = gray(64, 48);
        let out = compose(
            &poster(),
            &source,
            None,
            &mut FontBook::empty(),
            RenderOptions::PREVIEW,
        );
        assert_eq!(&out, source.pixels());
    }

    #[test]
    fn test_guides_drawn_only_in_preview() {
        let poster = poster();
        let source = gray(200, 100);
        let at = poster.position(FieldId::Currency);
        let (px, py) = at.to_pixels(200, 100);
        let (px, py) = (px.round() as u32, py.round() as u32);

        let mut fonts = FontBook::empty();
        let preview = compose(
            &poster,
            &source,
            Some(FieldId::Currency),
            &mut fonts,
            RenderOptions::PREVIEW,
        );
        assert_eq!(*preview.get_pixel(px, py), GUIDE_COLOR);
        // First dash of the vertical line starts at the top edge.
        assert_eq!(*preview.get_pixel(px, 0), GUIDE_COLOR);

        let export = compose(
            &poster,
            &source,
            Some(FieldId::Currency),
            &mut fonts,
            RenderOptions::EXPORT,
        );
        assert!(export.pixels().all(|p| *p != GUIDE_COLOR));
    }

    #[test]
    fn test_guide_dashes_leave_gaps() {
        let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        draw_guides(&mut canvas, Position::new(50.0, 50.0));
        // Vertical line at x=20: dash on 0..5, gap on 5..10 (outside the marker).
        assert_eq!(*canvas.get_pixel(20, 2), GUIDE_COLOR);
        assert_eq!(*canvas.get_pixel(20, 7), Rgba([0, 0, 0, 255]));
    }
}
