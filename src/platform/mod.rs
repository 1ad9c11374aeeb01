//! Platform abstraction layer
//!
//! Translates window-system events into simulation input. Kept free of any
//! window-system dependency so drivers can feed it from whatever backend they use.

pub mod input;

pub use input::{PointerEvent, PointerSample, PointerTracker};
