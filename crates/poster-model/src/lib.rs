//! RatePoster Poster Model
//!
//! Defines the data contracts of a poster:
//! - **Fields:** The ten fixed overlay slots and their per-field state
//! - **Positions:** Percent coordinates relative to the source image
//! - **Style:** Colour and font family shared by every field
//! - **Locale:** Khmer/English date and time derivation from an explicit clock
//!
//! All positions are percentages in `[0.0, 100.0]` relative to the loaded
//! image so they survive any preview scaling.

pub mod field;
pub mod locale;
pub mod numfmt;
pub mod position;
pub mod poster;
pub mod source;
pub mod style;

pub use field::*;
pub use position::*;
pub use poster::*;
pub use source::*;
pub use style::*;
