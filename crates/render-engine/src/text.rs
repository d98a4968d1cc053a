//! Shaped text rasterisation.
//!
//! `rustybuzz` turns a string into positioned glyph ids (so Khmer clusters
//! and ligatures come out right) and `ab_glyph` rasterises each glyph's
//! outline, which is then alpha-blended onto the canvas.

use ab_glyph::{point, Font, FontRef, GlyphId, PxScale, ScaleFont};
use image::{Pixel, Rgba, RgbaImage};

use crate::fonts::LoadedFont;

/// A glyph placed relative to the line's left baseline origin, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub id: u16,
    pub x: f32,
    pub y: f32,
}

/// A single shaped line of text at a given pixel size.
#[derive(Debug, Clone)]
pub struct ShapedLine {
    pub glyphs: Vec<PlacedGlyph>,
    /// Total horizontal advance.
    pub width: f32,
}

/// Shape `text` with `font` at an em size of `px` pixels.
pub fn shape(font: &LoadedFont, text: &str, px: f32) -> Option<ShapedLine> {
    let face = rustybuzz::Face::from_slice(font.data(), font.index())?;
    let upem = face.units_per_em() as f32;
    if upem <= 0.0 {
        return None;
    }
    let scale = px / upem;

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();
    let output = rustybuzz::shape(&face, &[], buffer);

    let mut glyphs = Vec::with_capacity(output.len());
    let (mut pen_x, mut pen_y) = (0.0f32, 0.0f32);
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        glyphs.push(PlacedGlyph {
            id: info.glyph_id as u16,
            x: pen_x + pos.x_offset as f32 * scale,
            y: pen_y - pos.y_offset as f32 * scale,
        });
        pen_x += pos.x_advance as f32 * scale;
        pen_y -= pos.y_advance as f32 * scale;
    }

    Some(ShapedLine {
        glyphs,
        width: pen_x,
    })
}

/// Draw `text` centred horizontally on `cx` and vertically (em middle) on `cy`.
///
/// Returns `false` when the font could not be used, in which case the canvas
/// is untouched.
pub fn draw_text_centered(
    canvas: &mut RgbaImage,
    font: &LoadedFont,
    text: &str,
    px: f32,
    (cx, cy): (f32, f32),
    color: Rgba<u8>,
) -> bool {
    if text.is_empty() || px <= 0.0 {
        return true;
    }
    let Some(line) = shape(font, text, px) else {
        return false;
    };
    let Ok(raster) = FontRef::try_from_slice_and_index(font.data(), font.index()) else {
        return false;
    };
    let Some(upem) = raster.units_per_em() else {
        return false;
    };

    // ab_glyph scales by line height, not em size.
    let scale = PxScale::from(px * raster.height_unscaled() / upem);
    let scaled = raster.as_scaled(scale);
    let origin_x = cx - line.width / 2.0;
    let baseline = cy + (scaled.ascent() + scaled.descent()) / 2.0;

    for glyph in &line.glyphs {
        let positioned = GlyphId(glyph.id)
            .with_scale_and_position(scale, point(origin_x + glyph.x, baseline + glyph.y));
        let Some(outlined) = raster.outline_glyph(positioned) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i64 + gx as i64;
            let y = bounds.min.y as i64 + gy as i64;
            blend(canvas, x, y, color, coverage);
        });
    }
    true
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
    if alpha == 0 {
        return;
    }
    let mut src = color;
    src[3] = alpha;
    canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::fonts::FontBook;

    fn fixture_font() -> LoadedFont {
        let mut book = FontBook::empty();
        book.load_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"));
        book.resolve("DejaVu Sans Mono").unwrap()
    }

    fn lit_centre(canvas: &RgbaImage) -> (f32, f32, usize) {
        let lit: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] > 127)
            .map(|(x, y, _)| (x, y))
            .collect();
        let n = lit.len().max(1) as f32;
        let mean_x = lit.iter().map(|(x, _)| *x as f32 + 0.5).sum::<f32>() / n;
        let mean_y = lit.iter().map(|(_, y)| *y as f32 + 0.5).sum::<f32>() / n;
        (mean_x, mean_y, lit.len())
    }

    #[test]
    fn test_blend_ignores_out_of_bounds() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        blend(&mut canvas, -1, 0, Rgba([255, 0, 0, 255]), 1.0);
        blend(&mut canvas, 4, 4, Rgba([255, 0, 0, 255]), 1.0);
        assert!(canvas.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_blend_full_coverage_replaces_pixel() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        blend(&mut canvas, 1, 1, Rgba([238, 206, 105, 255]), 1.0);
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([238, 206, 105, 255]));
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_shaped_width_grows_with_text() {
        let font = fixture_font();
        let one = shape(&font, "0", 40.0).unwrap();
        let three = shape(&font, "000", 40.0).unwrap();
        assert_eq!(one.glyphs.len(), 1);
        assert_eq!(three.glyphs.len(), 3);
        // Monospaced: every advance is the same.
        assert!((three.width - 3.0 * one.width).abs() < 0.01);
        assert!(one.width > 0.0);
    }

    #[test]
    fn test_text_is_centred_on_anchor() {
        let font = fixture_font();
        let mut canvas = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 255]));
        assert!(draw_text_centered(
            &mut canvas,
            &font,
            "000",
            40.0,
            (100.0, 50.0),
            Rgba([255, 255, 255, 255]),
        ));

        let (mean_x, mean_y, lit) = lit_centre(&canvas);
        assert!(lit > 100, "only {lit} pixels drawn");
        assert!((mean_x - 100.0).abs() < 3.0, "mean x {mean_x}");
        assert!((mean_y - 50.0).abs() < 5.0, "mean y {mean_y}");
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let font = fixture_font();
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        assert!(draw_text_centered(&mut canvas, &font, "", 12.0, (10.0, 10.0), Rgba([255; 4])));
        assert_eq!(lit_centre(&canvas).2, 0);
    }
}
