use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use image::{Rgba, RgbaImage};

use rateposter_common::error::PosterError;
use rateposter_editor::{Editor, EditorEvent};
use rateposter_model::{FieldId, SourceImage, Style};
use rateposter_render::compositor::GUIDE_COLOR;
use rateposter_render::{export_poster, Compositor, FontBook};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rateposter-render-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn editor_with(width: u32, height: u32) -> Editor {
    let mut editor = Editor::new(fixed_now(), Style::default());
    editor.apply(EditorEvent::ImageDecoded(SourceImage::new(RgbaImage::from_pixel(
        width,
        height,
        Rgba([12, 40, 80, 255]),
    ))));
    editor
}

#[test]
fn export_keeps_native_resolution() {
    let dir = scratch_dir("native");
    let editor = editor_with(640, 360);
    let mut compositor = Compositor::new(FontBook::system());
    let now = Utc.timestamp_millis_opt(1_760_600_000_000).unwrap();

    let path = export_poster(&editor, &mut compositor, &dir, now).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "exchange-rate-1760600000000.png"
    );

    let written = image::open(&path).unwrap();
    assert_eq!((written.width(), written.height()), (640, 360));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn export_without_image_writes_nothing() {
    let dir = scratch_dir("empty");
    let editor = Editor::new(fixed_now(), Style::default());
    let mut compositor = Compositor::new(FontBook::empty());

    let err = export_poster(&editor, &mut compositor, &dir, Utc::now()).unwrap_err();
    assert!(matches!(err, PosterError::NoImage));
    assert_eq!(err.to_string(), "Please upload an image first!");
    assert!(!dir.exists());
}

#[test]
fn export_mid_drag_has_no_guides() {
    let dir = scratch_dir("drag");
    let mut editor = editor_with(300, 200);
    let anchor = FieldId::Currency.default_position();
    editor.apply(EditorEvent::PointerDown {
        x: anchor.x(),
        y: anchor.y(),
    });
    editor.apply(EditorEvent::PointerMove { x: 50.0, y: 50.0 });
    assert!(editor.drag().is_some());

    // An empty font book keeps the check independent of installed fonts.
    let mut compositor = Compositor::new(FontBook::empty());
    let preview = compositor.preview(&editor).unwrap();
    assert_eq!(*preview.get_pixel(150, 100), GUIDE_COLOR);

    let path = export_poster(&editor, &mut compositor, &dir, Utc::now()).unwrap();
    let written = image::open(&path).unwrap().to_rgba8();
    assert!(written.pixels().all(|p| *p != GUIDE_COLOR));

    std::fs::remove_dir_all(&dir).ok();
}
