//! RatePoster Editor Core
//!
//! Turns discrete user input into poster state changes:
//! - **Hit-Testing:** Pick the field under the pointer in enumeration order
//! - **Dragging:** Track the field being repositioned and its live position
//! - **Editor:** Single-threaded event loop state with a redraw revision
//! - **Refresh:** Minute/day clock refresh of the derived date and time fields
//!
//! This crate is pure computation — no I/O, no drawing, no timers of its
//! own. The caller feeds events (including clock ticks) in order.

pub mod drag;
pub mod editor;
pub mod hit_test;
pub mod refresh;

pub use drag::DragSession;
pub use editor::{Applied, Editor, EditorEvent, Notice};
pub use hit_test::{hit_test, HIT_TOLERANCE};
pub use refresh::{RefreshDue, RefreshSchedule};
