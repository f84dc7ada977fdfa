//! Blend core crate.
//!
//! This crate owns the gradient data model consumed by the blend tool editor:
//! the segment chain, colour types, blending and the split/merge/compress
//! edits, plus the small geometry and logging helpers shared by higher layers.

pub mod coords;
pub mod logging;
pub mod paint;
