//! Gradient paint model.
//!
//! Scope:
//! - straight-alpha colors and the foreground/background context
//! - segments (positions, endpoint colors, blend shape, coloring mode)
//! - the [`Gradient`] chain and its structural edits
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod error;
pub mod gradient;
pub mod segment;

pub use color::{Color, Hsv};
pub use error::GradientError;
pub use gradient::{Gradient, SegmentSide};
pub use segment::{BlendFunction, ColorContext, ColorType, ColoringMode, GradientSegment, EPSILON};
