//! Compose a poster headlessly and save it as PNG.

use std::path::PathBuf;

use rateposter_common::clock::{SystemClock, WallClock};
use rateposter_common::AppConfig;
use rateposter_editor::{Editor, EditorEvent};
use rateposter_model::{FieldId, Position, Style};
use rateposter_render::{export_poster, load_source, write_png, Compositor, FontBook, RenderOptions};

/// Field and style overrides from the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub set: Vec<String>,
    pub pos: Vec<String>,
    pub size: Vec<String>,
    pub color: Option<String>,
    pub font: Option<String>,
}

pub async fn run(
    config: &AppConfig,
    image: PathBuf,
    output: Option<PathBuf>,
    overrides: Overrides,
    at: Option<String>,
) -> anyhow::Result<()> {
    let now = super::resolve_now(at.as_deref())?;
    let style = Style::new(
        overrides
            .color
            .clone()
            .unwrap_or_else(|| config.style.text_color.clone()),
        overrides
            .font
            .clone()
            .unwrap_or_else(|| config.style.font_family.clone()),
    );

    let mut editor = Editor::new(now, style);
    for event in override_events(&overrides)? {
        editor.apply(event);
    }

    println!("Loading image: {}", image.display());
    editor.begin_upload();
    let source = load_source(image)
        .await
        .map_err(|e| anyhow::anyhow!("Error reading file: {e}"))?;
    println!("  Resolution: {}x{}", source.width(), source.height());
    editor.apply(EditorEvent::ImageDecoded(source));

    let mut compositor = Compositor::new(FontBook::from_config(&config.fonts));
    let path = match output {
        Some(path) => {
            let source = editor
                .export_source()
                .map_err(|notice| anyhow::anyhow!(notice.message()))?;
            let composed =
                compositor.compose(editor.poster(), source, None, RenderOptions::EXPORT);
            write_png(&composed, &path).map_err(|e| anyhow::anyhow!("Export failed: {e}"))?;
            path
        }
        None => export_poster(
            &editor,
            &mut compositor,
            &config.export.directory,
            SystemClock.now_utc(),
        )
        .map_err(|e| anyhow::anyhow!("Export failed: {e}"))?,
    };

    println!("✓ Poster saved: {}", path.display());
    Ok(())
}

/// Turn `--set`, `--pos`, `--size`, `--color`, and `--font` into editor events.
pub fn override_events(overrides: &Overrides) -> anyhow::Result<Vec<EditorEvent>> {
    let mut events = Vec::new();

    for raw in &overrides.set {
        let (field, text) = split_assignment(raw, "--set")?;
        events.push(EditorEvent::SetText {
            field,
            text: text.to_string(),
        });
    }

    for raw in &overrides.pos {
        let (field, value) = split_assignment(raw, "--pos")?;
        let (x, y) = value
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("--pos expects FIELD=X,Y, got '{raw}'"))?;
        let x: f64 = x
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("--pos: invalid x in '{raw}'"))?;
        let y: f64 = y
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("--pos: invalid y in '{raw}'"))?;
        events.push(EditorEvent::SetPosition {
            field,
            position: Position::new(x, y),
        });
    }

    for raw in &overrides.size {
        let (field, value) = split_assignment(raw, "--size")?;
        let px: u32 = value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("--size: invalid pixel size in '{raw}'"))?;
        let range = field.size_range();
        if px != range.clamp(px) {
            tracing::warn!(%field, px, min = range.min, max = range.max, "Size clamped");
        }
        events.push(EditorEvent::SetSize { field, px });
    }

    if let Some(color) = &overrides.color {
        events.push(EditorEvent::SetColor(color.clone()));
    }
    if let Some(font) = &overrides.font {
        events.push(EditorEvent::SetFont(font.clone()));
    }

    Ok(events)
}

fn split_assignment<'a>(raw: &'a str, flag: &str) -> anyhow::Result<(FieldId, &'a str)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("{flag} expects FIELD=VALUE, got '{raw}'"))?;
    let field: FieldId = field.parse()?;
    Ok((field, value))
}
