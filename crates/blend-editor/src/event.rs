use crate::line::Handle;

/// Keyboard modifiers held during a handle click.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// How many times a handle was clicked in quick succession.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PressType {
    Single,
    Double,
    Triple,
}

/// Notifications emitted by the line widget.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// Query: may a slider be inserted at line value `value`?
    CanAddSlider { value: f64 },
    /// A slider should be inserted at line value `value`.
    AddSlider { value: f64 },
    /// Slider `index` was dragged off the line.
    RemoveSlider { index: usize },
    /// The selected handle changed.
    SelectionChanged,
    /// A handle was clicked. Emitted before any drag starts.
    HandleClicked {
        handle: Handle,
        modifiers: Modifiers,
        press: PressType,
    },
    /// Slider values changed, typically at the end of a drag.
    Changed,
}

/// What the editor made of a [`LineEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineResponse {
    /// Not handled; the widget proceeds with its default behavior.
    Ignored,
    /// Handled; the widget should not apply its default behavior.
    Consumed,
    /// Answer to [`LineEvent::CanAddSlider`].
    CanAdd(bool),
    /// Answer to [`LineEvent::AddSlider`]: index of the new slider.
    Added(usize),
}

impl LineResponse {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == LineResponse::Consumed
    }
}
