//! Geometry types shared by the editor's line widget and property panel.
//!
//! Image space:
//! - Pixels, double precision
//! - Origin top-left
//! - +X right, +Y down

mod vec2;

pub use vec2::Vec2;
