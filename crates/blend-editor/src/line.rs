//! Model of the on-canvas line widget the gradient is edited through.
//!
//! The line runs from a start point to an end point in image space. Along it
//! sit the sliders produced by [`crate::mapper::build_sliders`]; the user can
//! drag, select, add and remove them. Rendering is someone else's job: this
//! type only holds the state the editor reads and writes.

use blend_core::coords::Vec2;

use crate::error::EditorError;

/// What a slider on the line stands for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SliderKind {
    /// Boundary between segment `segment` and `segment + 1`.
    Stop,
    /// Interpolation midpoint inside segment `segment`.
    Midpoint,
}

/// One draggable control point, in line space (`[0, 1]` along the line).
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub kind: SliderKind,
    /// Index of the segment this slider was built from.
    pub segment: usize,
    pub visible: bool,
    pub movable: bool,
    pub removable: bool,
    /// Only drawn while the pointer is near the line.
    pub autohide: bool,
}

impl Slider {
    pub fn new(kind: SliderKind, segment: usize, value: f64, min: f64, max: f64) -> Self {
        Self {
            value,
            min,
            max,
            kind,
            segment,
            visible: true,
            movable: true,
            removable: false,
            autohide: false,
        }
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        self.kind == SliderKind::Stop
    }

    #[inline]
    pub fn is_midpoint(&self) -> bool {
        self.kind == SliderKind::Midpoint
    }
}

/// A selectable handle on the line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Handle {
    Start,
    End,
    /// Index into the line's slider array.
    Slider(usize),
}

impl Handle {
    #[inline]
    pub fn is_endpoint(self) -> bool {
        matches!(self, Handle::Start | Handle::End)
    }

    /// Start ↔ End; slider handles are returned unchanged.
    #[inline]
    pub fn opposite_endpoint(self) -> Handle {
        match self {
            Handle::Start => Handle::End,
            Handle::End => Handle::Start,
            other => other,
        }
    }
}

/// The line widget's editable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolLine {
    start: Vec2,
    end: Vec2,
    sliders: Vec<Slider>,
    selection: Option<Handle>,
}

impl ToolLine {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            sliders: Vec::new(),
            selection: None,
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Position of an endpoint handle; `None` for sliders.
    pub fn point(&self, handle: Handle) -> Option<Vec2> {
        match handle {
            Handle::Start => Some(self.start),
            Handle::End => Some(self.end),
            Handle::Slider(_) => None,
        }
    }

    /// Moves an endpoint handle. Returns `false` for slider handles.
    pub fn set_point(&mut self, handle: Handle, pos: Vec2) -> bool {
        match handle {
            Handle::Start => self.start = pos,
            Handle::End => self.end = pos,
            Handle::Slider(_) => return false,
        }
        true
    }

    #[inline]
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Replaces the slider array.
    ///
    /// A selected slider that no longer exists is deselected.
    pub fn set_sliders(&mut self, sliders: Vec<Slider>) {
        self.sliders = sliders;
        if matches!(self.selection, Some(Handle::Slider(i)) if i >= self.sliders.len()) {
            self.selection = None;
        }
    }

    #[inline]
    pub fn selection(&self) -> Option<Handle> {
        self.selection
    }

    /// Selects `handle` (or nothing). Returns `true` if the selection changed.
    ///
    /// Selecting a slider index past the end of the array is ignored.
    pub fn set_selection(&mut self, handle: Option<Handle>) -> bool {
        if let Some(Handle::Slider(i)) = handle {
            if i >= self.sliders.len() {
                log::warn!("ignoring selection of slider {i} ({} sliders)", self.sliders.len());
                return false;
            }
        }
        let changed = self.selection != handle;
        self.selection = handle;
        changed
    }

    /// Drags slider `index` to `value`, clamped to its `[min, max]`.
    ///
    /// Returns the value actually applied. NaN and infinities are refused.
    pub fn drag_slider(&mut self, index: usize, value: f64) -> Result<f64, EditorError> {
        let count = self.sliders.len();
        let slider = self
            .sliders
            .get_mut(index)
            .ok_or(EditorError::OutOfRange { index, count })?;
        if !value.is_finite() {
            return Err(EditorError::NonFinite { value });
        }
        if slider.movable {
            slider.value = value.clamp(slider.min, slider.max);
        }
        Ok(slider.value)
    }

    /// Line parameter of the point on the line closest to `pos`, in `[0, 1]`.
    pub fn value_at(&self, pos: Vec2) -> f64 {
        let dir = self.end - self.start;
        let len2 = dir.length_squared();
        if len2 <= f64::EPSILON {
            return 0.0;
        }
        ((pos - self.start).dot(dir) / len2).clamp(0.0, 1.0)
    }

    /// Image-space position of line parameter `value`.
    pub fn point_at(&self, value: f64) -> Vec2 {
        self.start.lerp(self.end, value)
    }
}
