use blend_core::paint::GradientError;
use thiserror::Error;

/// Failures surfaced by the slider mapper and the editor controller.
///
/// All of them are caller-preventable: they indicate a desynchronized
/// widget, an unguarded edit of a read-only gradient, or a degenerate offset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("slider index {index} out of range ({count} sliders)")]
    OutOfRange { index: usize, count: usize },

    #[error("gradient is not editable")]
    NotWritable,

    #[error("slider value {value} is not a finite number")]
    NonFinite { value: f64 },

    #[error("offset {offset} leaves no editable range")]
    DegenerateOffset { offset: f64 },

    #[error("no gradient is active")]
    NoGradient,

    #[error("the editor has not been started")]
    NoLine,

    #[error(transparent)]
    Gradient(#[from] GradientError),
}
