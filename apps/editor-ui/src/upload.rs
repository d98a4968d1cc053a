//! Background decoding of uploaded images.
//!
//! The decode runs on the tokio runtime; its outcome comes back over a
//! channel that the UI polls once per frame and turns into an editor event.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use eframe::egui;
use rateposter_editor::EditorEvent;
use rateposter_render::{decode_source, load_source};

/// Where the uploaded bytes come from.
pub enum UploadSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl UploadSource {
    /// Pick the usable part of a file dropped onto the window.
    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        if let Some(bytes) = &file.bytes {
            return Some(Self::Bytes(bytes.clone()));
        }
        file.path.clone().map(Self::Path)
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("{} dropped bytes", bytes.len()),
        }
    }
}

/// An in-flight decode.
pub struct PendingUpload {
    receiver: Receiver<EditorEvent>,
}

impl PendingUpload {
    /// Start decoding on `runtime`; `ctx` is woken when the result is ready.
    pub fn start(runtime: &tokio::runtime::Runtime, ctx: &egui::Context, source: UploadSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        tracing::info!(source = %source.describe(), "Decoding upload");

        runtime.spawn(async move {
            let result = match source {
                UploadSource::Path(path) => load_source(path).await,
                UploadSource::Bytes(bytes) => decode_source(bytes.to_vec()).await,
            };
            let event = match result {
                Ok(image) => EditorEvent::ImageDecoded(image),
                Err(e) => EditorEvent::ImageFailed(e.to_string()),
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });

        Self { receiver: rx }
    }

    /// The finished event, if the decode has completed.
    pub fn poll(&self) -> Option<EditorEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(EditorEvent::ImageFailed(
                "decode worker disconnected".to_string(),
            )),
        }
    }
}
