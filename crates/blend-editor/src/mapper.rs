//! Mapping between a gradient's segment chain and the line's slider array.
//!
//! # Layout
//!
//! For `N` segments the slider array holds `2N - 1` entries:
//!
//! | Index | Slider |
//! |-------|--------|
//! | `0 .. N-1` | stop between segment `i` and `i + 1` |
//! | `N-1 .. 2N-1` | midpoint of segment `i - (N - 1)` |
//!
//! # Transforms
//!
//! Segment space and line space differ by two invertible maps, applied in
//! this order when building sliders:
//!
//! 1. reversal: `v → 1 - v` (limits swap: `min' = 1 - max`, `max' = 1 - min`)
//! 2. offset: `v → (1 - offset)·v + offset`
//!
//! [`to_segment_value`] undoes both. Everything here is stateless; the
//! editor passes in the current options on every call.

use blend_core::paint::{ColorContext, Gradient, GradientSegment};

pub use blend_core::paint::EPSILON;

use crate::error::EditorError;
use crate::line::{Handle, Slider, SliderKind};

// ── transforms ────────────────────────────────────────────────────────────

/// Mirrors a slider in place: value and both limits.
#[inline]
pub fn reverse_slider(slider: &mut Slider) {
    let min = slider.min;
    slider.value = 1.0 - slider.value;
    slider.min = 1.0 - slider.max;
    slider.max = 1.0 - min;
}

/// Remaps a slider from `[0, 1]` into `[offset, 1]` in place.
#[inline]
pub fn offset_slider(slider: &mut Slider, offset: f64) {
    let map = |v: f64| (1.0 - offset) * v + offset;
    slider.value = map(slider.value);
    slider.min = map(slider.min);
    slider.max = map(slider.max);
}

/// Forward transform of a single segment-space value into line space.
#[inline]
pub fn to_slider_value(value: f64, offset: f64, reversed: bool) -> f64 {
    let value = if reversed { 1.0 - value } else { value };
    (1.0 - offset) * value + offset
}

/// Inverse transform: line-space slider value back to segment space.
///
/// Fails with [`EditorError::DegenerateOffset`] when `offset >= 1`, where
/// the whole line collapses onto its end point and no inverse exists, and
/// with [`EditorError::NonFinite`] for NaN or infinite values.
pub fn to_segment_value(value: f64, offset: f64, reversed: bool) -> Result<f64, EditorError> {
    if !value.is_finite() {
        return Err(EditorError::NonFinite { value });
    }
    if offset >= 1.0 {
        return Err(EditorError::DegenerateOffset { offset });
    }
    let value = (value - offset) / (1.0 - offset);
    Ok(if reversed { 1.0 - value } else { value })
}

// ── building ──────────────────────────────────────────────────────────────

/// Builds the line's slider array for `segments`.
///
/// `editable` decides whether sliders can be moved, and whether stops can
/// be removed. Midpoints of zero-length segments are hidden, since they
/// would otherwise sit on top of (and steal clicks from) the stops.
pub fn build_sliders(
    segments: &[GradientSegment],
    offset: f64,
    reversed: bool,
    editable: bool,
) -> Vec<Slider> {
    let n = segments.len();
    let mut sliders = Vec::with_capacity((2 * n).saturating_sub(1));

    for (i, pair) in segments.windows(2).enumerate() {
        let (seg, next) = (&pair[0], &pair[1]);
        let mut slider = Slider::new(SliderKind::Stop, i, seg.right, seg.left, next.right);
        slider.movable = editable;
        slider.removable = editable;
        sliders.push(slider);
    }

    for (i, seg) in segments.iter().enumerate() {
        let mut slider = Slider::new(SliderKind::Midpoint, i, seg.middle, seg.left, seg.right);
        slider.visible = (slider.max - slider.min).abs() > EPSILON;
        slider.movable = editable;
        slider.autohide = true;
        sliders.push(slider);
    }

    for slider in &mut sliders {
        if reversed {
            reverse_slider(slider);
        }
        offset_slider(slider, offset);
    }

    log::trace!(
        "built {} sliders for {n} segments (offset {offset}, reversed {reversed})",
        sliders.len()
    );
    sliders
}

// ── resolving ─────────────────────────────────────────────────────────────

/// Whether slider `index` of a `count`-long array is a stop or a midpoint.
pub fn slider_kind(index: usize, count: usize) -> Result<SliderKind, EditorError> {
    if index >= count {
        return Err(EditorError::OutOfRange { index, count });
    }
    Ok(if index < count / 2 {
        SliderKind::Stop
    } else {
        SliderKind::Midpoint
    })
}

/// Segment denoted by slider `index` of a `count`-long array.
///
/// For a stop this is the segment on its left.
pub fn resolve_segment(index: usize, count: usize) -> Result<usize, EditorError> {
    Ok(match slider_kind(index, count)? {
        SliderKind::Stop => index,
        SliderKind::Midpoint => index - count / 2,
    })
}

/// Segment denoted by any line handle.
///
/// The endpoints map to the first and last segment; sliders go through
/// [`resolve_segment`]. The result is checked against `n_segments`.
pub fn resolve_handle(
    handle: Handle,
    n_segments: usize,
    slider_count: usize,
) -> Result<usize, EditorError> {
    let segment = match handle {
        Handle::Start => 0,
        Handle::End => n_segments.checked_sub(1).ok_or(EditorError::NoGradient)?,
        Handle::Slider(index) => resolve_segment(index, slider_count)?,
    };
    if segment >= n_segments {
        return Err(EditorError::OutOfRange {
            index: segment,
            count: n_segments,
        });
    }
    Ok(segment)
}

// ── editing ───────────────────────────────────────────────────────────────

/// A change requested of the gradient in response to a slider edit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegmentEdit {
    /// Move segment `segment`'s midpoint to `value`. Neighbours are untouched.
    SetMiddle { segment: usize, value: f64 },
    /// Move the boundary between `segment` and `segment + 1` to `value`,
    /// rescaling both segments' contents proportionally.
    MoveStop { segment: usize, value: f64 },
}

impl SegmentEdit {
    /// Applies the edit, reading the segments' current extents.
    pub fn apply(&self, gradient: &mut Gradient) -> Result<(), EditorError> {
        match *self {
            SegmentEdit::SetMiddle { segment, value } => {
                gradient.set_middle(segment, value)?;
            }
            SegmentEdit::MoveStop { segment, value } => {
                let left = gradient.segment(segment)?.left;
                let right = gradient.segment(segment + 1)?.right;
                let value = value.clamp(left, right);
                gradient.compress(segment, segment, left, value)?;
                gradient.compress(segment + 1, segment + 1, value, right)?;
            }
        }
        Ok(())
    }
}

/// Translates one slider's reported value into a gradient edit.
///
/// Returns `Ok(None)` when the value already matches the gradient to within
/// [`EPSILON`], so callers can skip opening a transaction.
pub fn plan_slider_edit(
    segments: &[GradientSegment],
    slider_value: f64,
    index: usize,
    slider_count: usize,
    offset: f64,
    reversed: bool,
) -> Result<Option<SegmentEdit>, EditorError> {
    let kind = slider_kind(index, slider_count)?;
    let segment = resolve_segment(index, slider_count)?;
    let value = to_segment_value(slider_value, offset, reversed)?;

    let out_of_range = |segment: usize| EditorError::OutOfRange {
        index: segment,
        count: segments.len(),
    };
    let seg = segments.get(segment).ok_or_else(|| out_of_range(segment))?;

    let (current, edit) = match kind {
        SliderKind::Midpoint => (seg.middle, SegmentEdit::SetMiddle { segment, value }),
        SliderKind::Stop => {
            if segment + 1 >= segments.len() {
                return Err(out_of_range(segment + 1));
            }
            (seg.right, SegmentEdit::MoveStop { segment, value })
        }
    };

    if (value - current).abs() <= EPSILON {
        return Ok(None);
    }
    Ok(Some(edit))
}

/// Plans the edits that bring `segments` in line with a whole slider array.
///
/// Midpoint edits come first: moving a stop rescales the adjacent midpoints
/// as a side effect, while moving a midpoint never affects a stop.
pub fn plan_sync(
    segments: &[GradientSegment],
    sliders: &[Slider],
    offset: f64,
    reversed: bool,
) -> Result<Vec<SegmentEdit>, EditorError> {
    let count = sliders.len();
    let expected = (2 * segments.len()).saturating_sub(1);
    if count != expected {
        return Err(EditorError::OutOfRange {
            index: count,
            count: expected,
        });
    }

    let mut midpoints = Vec::new();
    let mut stops = Vec::new();
    for (index, slider) in sliders.iter().enumerate() {
        if let Some(edit) = plan_slider_edit(segments, slider.value, index, count, offset, reversed)? {
            match edit {
                SegmentEdit::SetMiddle { .. } => midpoints.push(edit),
                SegmentEdit::MoveStop { .. } => stops.push(edit),
            }
        }
    }

    midpoints.extend(stops);
    Ok(midpoints)
}

/// Splits the segment containing segment-space `value` and returns the
/// slider index of the new stop.
pub fn add_stop_at(
    gradient: &mut Gradient,
    ctx: &ColorContext,
    value: f64,
) -> Result<usize, EditorError> {
    let (left, _) = gradient.split_at(ctx, value)?;
    log::debug!("added stop {left} at {value:.4}");
    Ok(left)
}

/// Merges the two segments around stop slider `index`.
///
/// Midpoint indices are ignored (the line only offers removal on stops).
pub fn remove_stop(gradient: &mut Gradient, index: usize, slider_count: usize) -> Result<(), EditorError> {
    if slider_kind(index, slider_count)? != SliderKind::Stop {
        log::debug!("slider {index} is not a stop; nothing to remove");
        return Ok(());
    }
    gradient.merge(index, index + 1)?;
    log::debug!("removed stop {index}");
    Ok(())
}
