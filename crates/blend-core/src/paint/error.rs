use thiserror::Error;

/// Contract violations reported by the [`super::Gradient`] API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error("segment index {index} out of range (gradient has {len} segments)")]
    OutOfRange { index: usize, len: usize },

    #[error("segment range {first}..={last} is empty or reversed")]
    InvalidRange { first: usize, last: usize },

    #[error("cannot split at {pos}: not strictly inside any segment")]
    SplitOutsideSegment { pos: f64 },

    #[error("gradient `{name}` is not writable")]
    NotWritable { name: String },

    #[error("segment chain is malformed: {reason}")]
    Malformed { reason: String },
}
