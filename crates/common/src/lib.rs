//! RatePoster Common Utilities
//!
//! Shared infrastructure for all RatePoster crates:
//! - Error types and result aliases
//! - Wall-clock abstraction so date/time derivation stays testable
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
