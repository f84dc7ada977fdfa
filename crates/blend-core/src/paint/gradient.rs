use super::color::Color;
use super::error::GradientError;
use super::segment::{ColorContext, ColorType, GradientSegment, EPSILON};

/// Which end of a segment an edit applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SegmentSide {
    Left,
    Right,
}

/// A named gradient: a contiguous chain of segments covering `[0, 1]`.
///
/// Invariants:
/// - at least one segment
/// - `segments[0].left == 0`, `segments[last].right == 1`
/// - `segments[i].right == segments[i + 1].left`
/// - `left <= middle <= right` within each segment
///
/// The chain is index-addressable; "next" and "previous" are `i + 1` and
/// `i - 1`. Every mutator keeps the invariants and bumps the revision, or,
/// while frozen, defers the bump until the outermost [`Gradient::thaw`].
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    name: String,
    segments: Vec<GradientSegment>,
    writable: bool,
    freeze_count: u32,
    pending: bool,
    revision: u64,
}

impl Gradient {
    /// A writable single-segment gradient from black to white.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: vec![GradientSegment::new(0.0, 1.0, Color::BLACK, Color::WHITE)],
            writable: true,
            freeze_count: 0,
            pending: false,
            revision: 0,
        }
    }

    /// Builds a writable gradient from an explicit chain, validating it.
    pub fn from_segments(
        name: impl Into<String>,
        segments: Vec<GradientSegment>,
    ) -> Result<Self, GradientError> {
        let gradient = Self {
            segments,
            ..Self::new(name)
        };
        gradient.validate()?;
        Ok(gradient)
    }

    /// Splits `[0, 1]` into `n` equal fixed-color segments (at least one).
    pub fn uniform(name: impl Into<String>, colors: &[Color]) -> Self {
        let n = colors.len().saturating_sub(1).max(1);
        let color = |i: usize| colors.get(i).copied().unwrap_or(Color::WHITE);
        let segments = (0..n)
            .map(|i| {
                let left = i as f64 / n as f64;
                let right = if i + 1 == n { 1.0 } else { (i + 1) as f64 / n as f64 };
                GradientSegment::new(left, right, color(i), color(i + 1))
            })
            .collect();
        Self {
            segments,
            ..Self::new(name)
        }
    }

    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    #[inline]
    pub fn segments(&self) -> &[GradientSegment] {
        &self.segments
    }

    #[inline]
    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, index: usize) -> Result<&GradientSegment, GradientError> {
        self.segments.get(index).ok_or(GradientError::OutOfRange {
            index,
            len: self.segments.len(),
        })
    }

    /// Incremented once per committed change (or once per outermost thaw).
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze_count > 0
    }

    /// Index of the segment containing `pos` (clamped to `[0, 1]`).
    ///
    /// A position on a boundary belongs to the segment on its left.
    pub fn segment_at(&self, pos: f64) -> usize {
        let pos = pos.clamp(0.0, 1.0);
        self.segments
            .iter()
            .position(|seg| pos <= seg.right)
            .unwrap_or(self.segments.len().saturating_sub(1))
    }

    // ── transactions ──────────────────────────────────────────────────────

    /// Opens a (nestable) batch of edits.
    pub fn freeze(&mut self) {
        self.freeze_count = self.freeze_count.saturating_add(1);
    }

    /// Closes a batch opened by [`freeze`](Self::freeze).
    ///
    /// Returns `true` when this was the outermost thaw and the batch changed
    /// something, i.e. when observers should treat the gradient as dirty.
    pub fn thaw(&mut self) -> bool {
        assert!(self.freeze_count > 0, "Gradient::thaw without matching freeze");
        self.freeze_count -= 1;
        if self.freeze_count == 0 && self.pending {
            self.pending = false;
            self.revision += 1;
            return true;
        }
        false
    }

    fn touch(&mut self) {
        if self.is_frozen() {
            self.pending = true;
        } else {
            self.revision += 1;
        }
    }

    fn ensure_writable(&self) -> Result<(), GradientError> {
        if self.writable {
            Ok(())
        } else {
            Err(GradientError::NotWritable {
                name: self.name.clone(),
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), GradientError> {
        self.segment(index).map(|_| ())
    }

    fn check_range(&self, first: usize, last: usize) -> Result<(), GradientError> {
        self.check_index(first)?;
        self.check_index(last)?;
        if first > last {
            return Err(GradientError::InvalidRange { first, last });
        }
        Ok(())
    }

    // ── edits ─────────────────────────────────────────────────────────────

    /// Replaces this gradient's segments with a copy of `other`'s.
    ///
    /// Name, writability and revision history are kept.
    pub fn copy_from(&mut self, other: &Gradient) -> Result<(), GradientError> {
        self.ensure_writable()?;
        self.segments = other.segments.clone();
        self.touch();
        Ok(())
    }

    /// Moves a segment's midpoint, clamped to the segment.
    pub fn set_middle(&mut self, index: usize, middle: f64) -> Result<(), GradientError> {
        self.ensure_writable()?;
        self.check_index(index)?;
        let seg = &mut self.segments[index];
        seg.middle = middle.clamp(seg.left, seg.right);
        self.touch();
        Ok(())
    }

    /// Sets one endpoint's color and makes it [`ColorType::Fixed`].
    pub fn set_color(
        &mut self,
        index: usize,
        side: SegmentSide,
        color: Color,
    ) -> Result<(), GradientError> {
        self.ensure_writable()?;
        self.check_index(index)?;
        let seg = &mut self.segments[index];
        match side {
            SegmentSide::Left => {
                seg.left_color = color;
                seg.left_color_type = ColorType::Fixed;
            }
            SegmentSide::Right => {
                seg.right_color = color;
                seg.right_color_type = ColorType::Fixed;
            }
        }
        self.touch();
        Ok(())
    }

    /// Sets one endpoint's color type, leaving its stored color alone.
    pub fn set_color_type(
        &mut self,
        index: usize,
        side: SegmentSide,
        color_type: ColorType,
    ) -> Result<(), GradientError> {
        self.ensure_writable()?;
        self.check_index(index)?;
        let seg = &mut self.segments[index];
        match side {
            SegmentSide::Left => seg.left_color_type = color_type,
            SegmentSide::Right => seg.right_color_type = color_type,
        }
        self.touch();
        Ok(())
    }

    /// Splits the segment containing `pos` in two at `pos`.
    ///
    /// Both halves get centered midpoints. The new inner endpoints become
    /// fixed colors equal to the gradient's color at `pos`; the outer
    /// endpoints, blend function and coloring mode are inherited.
    ///
    /// Returns the indices of the left and right halves.
    pub fn split_at(
        &mut self,
        ctx: &ColorContext,
        pos: f64,
    ) -> Result<(usize, usize), GradientError> {
        self.ensure_writable()?;
        let index = self.segment_at(pos);
        if !self.segments[index].strictly_contains(pos) {
            return Err(GradientError::SplitOutsideSegment { pos });
        }

        let color = self.segments[index].color_at(ctx, pos);
        let seg = &mut self.segments[index];

        let mut right = seg.clone();
        right.left = pos;
        right.middle = (pos + right.right) / 2.0;
        right.left_color = color;
        right.left_color_type = ColorType::Fixed;

        seg.right = pos;
        seg.middle = (seg.left + pos) / 2.0;
        seg.right_color = color;
        seg.right_color_type = ColorType::Fixed;

        self.segments.insert(index + 1, right);
        self.touch();
        log::trace!("split `{}` at {pos} → segments {index}, {}", self.name, index + 1);
        Ok((index, index + 1))
    }

    /// Collapses `first..=last` into a single segment.
    ///
    /// The merged segment keeps `first`'s left endpoint and `last`'s right
    /// endpoint; its midpoint is re-centered. Returns its index (`first`).
    pub fn merge(&mut self, first: usize, last: usize) -> Result<usize, GradientError> {
        self.ensure_writable()?;
        self.check_range(first, last)?;
        if first == last {
            return Ok(first);
        }

        let tail = self.segments[last].clone();
        self.segments.drain(first + 1..=last);

        let seg = &mut self.segments[first];
        seg.right = tail.right;
        seg.right_color = tail.right_color;
        seg.right_color_type = tail.right_color_type;
        seg.middle = (seg.left + seg.right) / 2.0;

        self.touch();
        log::trace!("merged `{}` segments {first}..={last}", self.name);
        Ok(first)
    }

    /// Proportionally rescales every position in `first..=last` so that the
    /// range spans `[new_left, new_right]`.
    ///
    /// Callers are responsible for keeping the neighbours outside the range
    /// contiguous (typically by compressing them in the same batch).
    pub fn compress(
        &mut self,
        first: usize,
        last: usize,
        new_left: f64,
        new_right: f64,
    ) -> Result<(), GradientError> {
        self.ensure_writable()?;
        self.check_range(first, last)?;

        let orig_left = self.segments[first].left;
        let orig_right = self.segments[last].right;
        let orig_width = orig_right - orig_left;
        let scale = if orig_width > EPSILON {
            (new_right - new_left) / orig_width
        } else {
            0.0
        };
        let map = |v: f64| new_left + (v - orig_left) * scale;

        for seg in &mut self.segments[first..=last] {
            seg.left = map(seg.left);
            seg.middle = map(seg.middle);
            seg.right = map(seg.right);
        }

        // Pin the outer boundaries exactly so neighbours stay contiguous.
        self.segments[first].left = new_left;
        let tail = &mut self.segments[last];
        tail.right = new_right;
        if orig_width <= EPSILON {
            tail.middle = (tail.left + tail.right) / 2.0;
        }

        self.touch();
        Ok(())
    }

    /// Checks the chain invariants.
    pub fn validate(&self) -> Result<(), GradientError> {
        let malformed =
            |reason: String| -> Result<(), GradientError> { Err(GradientError::Malformed { reason }) };

        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            return malformed("no segments".into());
        };
        if first.left.abs() > EPSILON {
            return malformed(format!("first segment starts at {}", first.left));
        }
        if (last.right - 1.0).abs() > EPSILON {
            return malformed(format!("last segment ends at {}", last.right));
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if !(seg.left <= seg.middle && seg.middle <= seg.right) {
                return malformed(format!(
                    "segment {i} is not ordered: {} / {} / {}",
                    seg.left, seg.middle, seg.right
                ));
            }
        }
        for (i, pair) in self.segments.windows(2).enumerate() {
            if (pair[0].right - pair[1].left).abs() > EPSILON {
                return malformed(format!("gap between segments {i} and {}", i + 1));
            }
        }
        Ok(())
    }
}
