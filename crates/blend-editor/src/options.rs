/// Tool options the editor reads on every sync.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendOptions {
    /// Share of the line, in percent, before the gradient starts. Always
    /// within `0..=100`.
    offset: f64,
    /// Draw the gradient end-to-start.
    gradient_reverse: bool,
    /// Edit the active gradient in place instead of a custom copy.
    modify_active: bool,
    /// Instant mode: the line is dragged out and applied at once, so no
    /// sliders or property panel are shown.
    instant: bool,
}

impl BlendOptions {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            gradient_reverse: false,
            modify_active: false,
            instant: false,
        }
    }

    /// Offset in percent, `0..=100`.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Sets the offset in percent; clamped to `0..=100`, NaN becomes 0.
    pub fn set_offset(&mut self, percent: f64) {
        self.offset = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    }

    pub fn with_offset(mut self, percent: f64) -> Self {
        self.set_offset(percent);
        self
    }

    #[inline]
    pub fn gradient_reverse(&self) -> bool {
        self.gradient_reverse
    }

    pub fn set_gradient_reverse(&mut self, reverse: bool) {
        self.gradient_reverse = reverse;
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.gradient_reverse = reverse;
        self
    }

    #[inline]
    pub fn modify_active(&self) -> bool {
        self.modify_active
    }

    pub fn set_modify_active(&mut self, modify_active: bool) {
        self.modify_active = modify_active;
    }

    pub fn with_modify_active(mut self, modify_active: bool) -> Self {
        self.modify_active = modify_active;
        self
    }

    #[inline]
    pub fn instant(&self) -> bool {
        self.instant
    }

    pub fn set_instant(&mut self, instant: bool) {
        self.instant = instant;
    }

    pub fn with_instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }

    /// Offset as a fraction of the line, `0..=1`.
    #[inline]
    pub fn offset_fraction(&self) -> f64 {
        self.offset / 100.0
    }

    /// `true` when the offset swallows the whole line and slider values
    /// cannot be mapped back onto the gradient.
    #[inline]
    pub fn offset_is_degenerate(&self) -> bool {
        self.offset_fraction() >= 1.0
    }
}

impl Default for BlendOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Which option changed, as reported to [`crate::editor::BlendEditor::options_changed`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OptionChange {
    ModifyActive,
    GradientReverse,
    Offset,
    /// Any other property that affects the rendered gradient.
    Other,
}
