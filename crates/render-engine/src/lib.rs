//! RatePoster Render Engine
//!
//! Draws a poster onto its source image and exports the result.
//!
//! # Pipeline
//!
//! ```text
//! upload bytes ── decode (blocking worker) ──► SourceImage
//!                                                  │
//! Poster (fields, style) ──────────────────────────┤
//!                                                  ├── copy source at native size
//! FontBook ── resolve family (weight 600) ─────────┤
//!                                                  ├── shape + draw each field, centred
//! drag session (preview only) ─────────────────────┤
//!                                                  ├── guide lines + marker
//!                                                  ▼
//!                                           RgbaImage ── PNG encode ──► exchange-rate-<ms>.png
//! ```

pub mod compositor;
pub mod decode;
pub mod export;
pub mod fonts;
pub mod text;

pub use compositor::{compose, Compositor, RenderOptions};
pub use decode::{decode_bytes, decode_source, load_source};
pub use export::{encode_png, export_filename, export_poster, write_png};
pub use fonts::{FontBook, LoadedFont};
