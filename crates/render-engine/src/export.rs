//! PNG export.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use rateposter_common::error::{PosterError, PosterResult};
use rateposter_editor::Editor;

use crate::compositor::{Compositor, RenderOptions};

/// Encode a composed bitmap as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> PosterResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PosterError::render(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

/// Encode and write a bitmap to `path`, creating parent directories.
pub fn write_png(image: &RgbaImage, path: &Path) -> PosterResult<()> {
    let bytes = encode_png(image)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// `exchange-rate-<unix millis>.png`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("exchange-rate-{}.png", now.timestamp_millis())
}

/// Render the editor's poster without guides and save it into `output_dir`.
///
/// Fails with [`PosterError::NoImage`] and writes nothing when no image has
/// been uploaded.
pub fn export_poster(
    editor: &Editor,
    compositor: &mut Compositor,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> PosterResult<PathBuf> {
    let source = editor.export_source().map_err(|_| PosterError::NoImage)?;

    let composed = compositor.compose(editor.poster(), source, None, RenderOptions::EXPORT);
    let path = output_dir.join(export_filename(now));
    write_png(&composed, &path)?;

    tracing::info!(
        output = %path.display(),
        width = composed.width(),
        height = composed.height(),
        "Poster exported"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_filename_uses_millis() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(export_filename(now), "exchange-rate-1760000000123.png");
    }

    #[test]
    fn test_encode_png_signature() {
        let image = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
