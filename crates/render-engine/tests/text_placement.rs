use std::path::Path;

use chrono::NaiveDate;
use image::{Rgba, RgbaImage};

use rateposter_common::clock::{FixedClock, WallClock};
use rateposter_editor::{Editor, EditorEvent};
use rateposter_model::{FieldId, Position, SourceImage, Style};
use rateposter_render::{Compositor, FontBook, RenderOptions};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn fixture_fonts() -> FontBook {
    let mut book = FontBook::empty();
    book.load_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"));
    book
}

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    )
}

/// Editor over a black image where only `field` carries any text.
fn single_field_editor(width: u32, height: u32, field: FieldId, text: &str, px: u32) -> Editor {
    let mut editor = Editor::new(clock().now(), Style::new("#ffffff", "Kantumruy Pro"));
    editor.apply(EditorEvent::ImageDecoded(SourceImage::new(RgbaImage::from_pixel(
        width, height, BACKGROUND,
    ))));
    for id in FieldId::ALL {
        editor.apply(EditorEvent::SetText {
            field: id,
            text: String::new(),
        });
    }
    editor.apply(EditorEvent::SetText {
        field,
        text: text.to_string(),
    });
    editor.apply(EditorEvent::SetSize { field, px });
    editor
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
fn field_text_is_centred_on_default_anchor() {
    let editor = single_field_editor(600, 400, FieldId::BuyingRate, "000", 40);
    let mut compositor = Compositor::new(fixture_fonts());

    let canvas = compositor.preview(&editor).unwrap();
    let (ax, ay) = editor
        .poster()
        .position(FieldId::BuyingRate)
        .to_pixels(600, 400);

    let (cx, cy, lit) = lit_centre(&canvas);
    assert!(lit > 100, "only {lit} pixels drawn");
    assert!((cx - ax).abs() < 3.0, "centre x {cx} vs anchor {ax}");
    assert!((cy - ay).abs() < 5.0, "centre y {cy} vs anchor {ay}");
}

#[test]
fn moved_field_follows_its_new_anchor() {
    let mut editor = single_field_editor(600, 400, FieldId::Currency, "000", 40);
    let target = Position::new(25.0, 30.0);
    editor.apply(EditorEvent::SetPosition {
        field: FieldId::Currency,
        position: target,
    });
    let mut compositor = Compositor::new(fixture_fonts());

    let canvas = compositor.compose(
        editor.poster(),
        editor.image().unwrap(),
        None,
        RenderOptions::EXPORT,
    );
    let (ax, ay) = target.to_pixels(600, 400);
    assert_eq!((ax, ay), (150.0, 120.0));

    let (cx, cy, lit) = lit_centre(&canvas);
    assert!(lit > 100, "only {lit} pixels drawn");
    assert!((cx - ax).abs() < 3.0, "centre x {cx} vs anchor {ax}");
    assert!((cy - ay).abs() < 5.0, "centre y {cy} vs anchor {ay}");
}

#[test]
fn text_colour_comes_from_style() {
    let mut editor = single_field_editor(300, 200, FieldId::SellingRate, "000", 40);
    editor.apply(EditorEvent::SetColor("#ff0000".to_string()));
    let mut compositor = Compositor::new(fixture_fonts());

    let canvas = compositor.preview(&editor).unwrap();
    let touched: Vec<&Rgba<u8>> = canvas.pixels().filter(|p| **p != BACKGROUND).collect();
    assert!(!touched.is_empty());
    assert!(touched.iter().all(|p| p[1] == 0 && p[2] == 0 && p[0] > 0));
}
