//! Reading layer metadata out of a PSD file.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use psd::Psd;
use rateposter_common::error::{PosterError, PosterResult};

use crate::tree::{flatten, Bounds, LayerDocument, RawGroup, RawLayer};

/// Extract layer metadata, logging and swallowing every failure.
pub fn extract_layers(path: &Path) -> Option<LayerDocument> {
    match try_extract_layers(path) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Layer extraction failed");
            None
        }
    }
}

/// Extract layer metadata, returning the failure reason.
///
/// A panic inside the PSD parser is caught and reported as a
/// [`PosterError::Layers`] error.
pub fn try_extract_layers(path: &Path) -> PosterResult<LayerDocument> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PosterError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PosterError::Io(e),
    })?;

    let document = panic::catch_unwind(AssertUnwindSafe(|| parse(&bytes)))
        .map_err(|payload| PosterError::layers(format!("parser panicked: {}", panic_text(&payload))))??;

    tracing::debug!(
        path = %path.display(),
        width = document.width,
        height = document.height,
        entries = document.layers.len(),
        "Layers extracted"
    );
    Ok(document)
}

fn parse(bytes: &[u8]) -> PosterResult<LayerDocument> {
    let psd = Psd::from_bytes(bytes).map_err(|e| PosterError::layers(format!("{e:?}")))?;

    let layers: Vec<RawLayer> = psd
        .layers()
        .iter()
        .map(|layer| RawLayer {
            name: layer.name().to_string(),
            visible: layer.visible(),
            opacity: layer.opacity(),
            parent: layer.parent_id().map(|id| id as u64),
            bounds: Bounds::new(
                layer.layer_left() as i64,
                layer.layer_top() as i64,
                layer.layer_right() as i64,
                layer.layer_bottom() as i64,
            ),
        })
        .collect();

    // `groups()` lists groups in the order their records appear in the file.
    let groups: Vec<RawGroup> = psd
        .groups()
        .values()
        .enumerate()
        .map(|(order, group)| RawGroup {
            id: group.id() as u64,
            name: group.name().to_string(),
            visible: group.visible(),
            opacity: group.opacity(),
            parent: group.parent_id().map(|id| id as u64),
            order,
        })
        .collect();

    Ok(LayerDocument {
        width: psd.width(),
        height: psd.height(),
        layers: flatten(&layers, &groups),
    })
}

fn panic_text(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_text_variants() {
        let payload: Box<dyn Any + Send> = Box::new("index out of bounds");
        assert_eq!(panic_text(&payload), "index out of bounds");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bad header"));
        assert_eq!(panic_text(&payload), "bad header");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_text(&payload), "unknown panic");
    }
}
