//! Background image decoding.
//!
//! Decoding a large photo can take a noticeable fraction of a second, so the
//! async entry points move the work onto tokio's blocking pool and the caller
//! (UI or CLI) stays responsive.

use std::path::PathBuf;

use rateposter_common::error::{PosterError, PosterResult};
use rateposter_model::SourceImage;

/// Decode PNG or JPEG bytes into an RGBA source image.
pub fn decode_bytes(bytes: &[u8]) -> PosterResult<SourceImage> {
    let decoded = image::load_from_memory(bytes).map_err(|e| PosterError::decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    tracing::debug!(width = rgba.width(), height = rgba.height(), "Image decoded");
    Ok(SourceImage::new(rgba))
}

/// Decode on the blocking pool.
pub async fn decode_source(bytes: Vec<u8>) -> PosterResult<SourceImage> {
    tokio::task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| PosterError::decode(format!("decode task failed: {e}")))?
}

/// Read a file and decode it. Read failures are reported as decode failures
/// so they surface as the same upload notice.
pub async fn load_source(path: PathBuf) -> PosterResult<SourceImage> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| PosterError::decode(format!("{}: {e}", path.display())))?;
    decode_source(bytes).await
}
