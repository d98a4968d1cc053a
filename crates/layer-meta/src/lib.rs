//! RatePoster Layer Metadata
//!
//! Reads a layered PSD document and reports each layer and group with its
//! visibility, opacity, and bounds. Pixel data is never decoded.

pub mod extract;
pub mod tree;

pub use extract::{extract_layers, try_extract_layers};
pub use tree::{Bounds, LayerDocument, LayerKind, LayerRecord};
