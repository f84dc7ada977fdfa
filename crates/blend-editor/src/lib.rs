//! Blend editor: on-canvas gradient editing for the blend tool.
//!
//! The gradient is edited through a line dragged across the image. Its
//! segment boundaries ("stops") and interpolation midpoints show up as
//! sliders on that line; dragging, adding or removing a slider edits the
//! gradient, and every gradient change is mirrored back onto the line.
//!
//! # Quick start
//!
//! ```rust
//! use blend_core::coords::Vec2;
//! use blend_core::paint::{ColorContext, Gradient};
//! use blend_editor::prelude::*;
//!
//! let mut editor = BlendEditor::new(BlendOptions::new(), ColorContext::default());
//! editor.set_gradient(Some(Gradient::new("Black to White")));
//! editor.start(Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0));
//!
//! // A click halfway along the line asks for a new stop there.
//! let response = editor.on_line_event(&LineEvent::AddSlider { value: 0.5 }).unwrap();
//! assert_eq!(response, LineResponse::Added(0));
//! assert_eq!(editor.line().unwrap().sliders().len(), 3);
//! ```
//!
//! # Layers
//!
//! - [`mapper`]: pure conversions between gradient segments and sliders.
//! - [`line`] / [`panel`]: state of the two widgets the user interacts with.
//! - [`editor`]: the controller wiring widget events to gradient edits.

pub mod editor;
pub mod error;
pub mod event;
pub mod guard;
pub mod line;
pub mod mapper;
pub mod options;
pub mod panel;

pub use editor::BlendEditor;

/// Everything a widget host needs. Import this where the editor is driven.
pub mod prelude {
    pub use crate::editor::{BlendEditor, OptionsHints};
    pub use crate::error::EditorError;
    pub use crate::event::{LineEvent, LineResponse, Modifiers, PressType};
    pub use crate::line::{Handle, Slider, SliderKind, ToolLine};
    pub use crate::options::{BlendOptions, OptionChange};
    pub use crate::panel::{Direction, EditorPanel, EndpointEditor, GuiResponse};
}
