//! State of the floating property panel shown next to the line.
//!
//! The panel is created lazily the first time a handle gets selected and
//! hidden again when the selection is cleared. With an endpoint selected it
//! shows the endpoint editor: position fields, a color button and a
//! color-type selector. Layout and widgets belong to the host toolkit; this
//! module only holds the values the host should display.

use blend_core::coords::Vec2;
use blend_core::paint::{Color, ColorType};

/// Which side(s) of a stop a color entry edits.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// An endpoint entry: exactly one color, no sides.
    #[default]
    None,
    /// The right end of the segment left of the stop.
    Left,
    /// The left end of the segment right of the stop.
    Right,
}

impl Direction {
    /// Whether this entry writes the left segment's right end.
    ///
    /// `chained` links both sides so one edit updates the two.
    #[inline]
    pub fn edits_left_of_stop(self, chained: bool) -> bool {
        self == Direction::Left || chained
    }

    #[inline]
    pub fn edits_right_of_stop(self, chained: bool) -> bool {
        self == Direction::Right || chained
    }
}

/// Responses the panel's dialog can emit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GuiResponse {
    Close,
}

/// Endpoint editor contents.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointEditor {
    /// Endpoint position in image coordinates.
    pub position: Vec2,
    /// The endpoint's color with its color type resolved.
    pub color: Color,
    pub color_type: ColorType,
    /// `false` greys out the color controls (read-only gradient).
    pub sensitive: bool,
}

/// The whole panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorPanel {
    pub visible: bool,
    pub title: String,
    /// `Some` while an endpoint is selected.
    pub endpoint: Option<EndpointEditor>,
    /// Number of times the color dialogs were dismissed on a selection change.
    pub dialogs_closed: u32,
}

impl EditorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Dismisses any open color dialog, keeping the chosen color.
    pub fn close_color_dialogs(&mut self) {
        self.dialogs_closed += 1;
    }
}
