//! The blend tool's gradient editor.
//!
//! [`BlendEditor`] sits between three parties:
//!
//! - the **line widget** ([`ToolLine`]) the user drags handles on,
//! - the **property panel** ([`EditorPanel`]) showing the selected endpoint,
//! - the **gradient** being edited.
//!
//! Every line or panel notification lands in one of the `line_*` /
//! `*_changed` methods, which translate it into gradient edits through
//! [`crate::mapper`] and then push the new state back out.
//!
//! # Transactions
//!
//! Gradient edits run between a freeze and a thaw. Freezing blocks the
//! editor's own handlers and, unless the user asked to modify the active
//! gradient in place, first copies the active gradient into the writable
//! "Custom" gradient and makes that the active one. Thawing rebuilds the
//! sliders, refreshes the panel and unblocks the handlers.

use blend_core::coords::Vec2;
use blend_core::paint::{Color, ColorContext, ColorType, Gradient, SegmentSide};

use crate::error::EditorError;
use crate::event::{LineEvent, LineResponse, Modifiers, PressType};
use crate::guard::{BlockGuard, HandlerBlock};
use crate::line::{Handle, SliderKind, ToolLine};
use crate::mapper::{self, EPSILON};
use crate::options::{BlendOptions, OptionChange};
use crate::panel::{Direction, EditorPanel, EndpointEditor, GuiResponse};

/// Name of the scratch gradient edits of read-only gradients go to.
pub const CUSTOM_GRADIENT_NAME: &str = "Custom";

#[derive(Debug, Clone, PartialEq)]
enum ActiveGradient {
    None,
    Custom,
    Stock(Gradient),
}

/// Visibility/sensitivity of the option widgets that depend on the active
/// gradient.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct OptionsHints {
    /// "Modify active gradient" only means something for non-custom gradients.
    pub modify_active_sensitive: bool,
    /// Tell the user the active gradient cannot be modified in place.
    pub read_only_hint_visible: bool,
}

#[derive(Debug, Copy, Clone)]
enum ColorEdit {
    Color(Color),
    Type(ColorType),
}

impl ColorEdit {
    fn apply(self, gradient: &mut Gradient, segment: usize, side: SegmentSide) -> Result<(), EditorError> {
        match self {
            ColorEdit::Color(color) => gradient.set_color(segment, side, color)?,
            ColorEdit::Type(color_type) => gradient.set_color_type(segment, side, color_type)?,
        }
        Ok(())
    }
}

/// Interactive gradient editor for one blend tool instance.
#[derive(Debug)]
pub struct BlendEditor {
    options: BlendOptions,
    context: ColorContext,
    active: ActiveGradient,
    custom: Gradient,
    line: Option<ToolLine>,
    panel: Option<EditorPanel>,
    handlers: HandlerBlock,
    hints: OptionsHints,
}

impl BlendEditor {
    pub fn new(options: BlendOptions, context: ColorContext) -> Self {
        Self {
            options,
            context,
            active: ActiveGradient::None,
            custom: Gradient::new(CUSTOM_GRADIENT_NAME),
            line: None,
            panel: None,
            handlers: HandlerBlock::new(),
            hints: OptionsHints::default(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn options(&self) -> &BlendOptions {
        &self.options
    }

    #[inline]
    pub fn context(&self) -> &ColorContext {
        &self.context
    }

    /// Replaces the foreground/background pair and refreshes the panel.
    pub fn set_context(&mut self, context: ColorContext) {
        self.context = context;
        self.update_gui();
    }

    /// The active gradient, if any.
    pub fn gradient(&self) -> Option<&Gradient> {
        match &self.active {
            ActiveGradient::None => None,
            ActiveGradient::Custom => Some(&self.custom),
            ActiveGradient::Stock(gradient) => Some(gradient),
        }
    }

    fn gradient_mut(&mut self) -> Option<&mut Gradient> {
        match &mut self.active {
            ActiveGradient::None => None,
            ActiveGradient::Custom => Some(&mut self.custom),
            ActiveGradient::Stock(gradient) => Some(gradient),
        }
    }

    #[inline]
    pub fn is_custom_active(&self) -> bool {
        self.active == ActiveGradient::Custom
    }

    #[inline]
    pub fn custom_gradient(&self) -> &Gradient {
        &self.custom
    }

    #[inline]
    pub fn line(&self) -> Option<&ToolLine> {
        self.line.as_ref()
    }

    /// Mutable access for the widget host (drags, endpoint moves).
    ///
    /// Changes made here are not seen by the editor until the host reports
    /// them, e.g. through [`LineEvent::Changed`].
    #[inline]
    pub fn line_mut(&mut self) -> Option<&mut ToolLine> {
        self.line.as_mut()
    }

    #[inline]
    pub fn panel(&self) -> Option<&EditorPanel> {
        self.panel.as_ref()
    }

    #[inline]
    pub fn hints(&self) -> OptionsHints {
        self.hints
    }

    /// The handler-block counter; exposed so hosts can suppress echoes of
    /// their own programmatic widget updates.
    #[inline]
    pub fn handlers(&self) -> &HandlerBlock {
        &self.handlers
    }

    #[inline]
    fn selection(&self) -> Option<Handle> {
        self.line.as_ref().and_then(ToolLine::selection)
    }

    #[inline]
    fn slider_count(&self) -> usize {
        self.line.as_ref().map_or(0, |line| line.sliders().len())
    }

    /// Whether edits may proceed: either they go to a writable copy, or the
    /// active gradient itself is writable.
    pub fn is_gradient_editable(&self) -> bool {
        !self.options.modify_active() || self.gradient().is_some_and(Gradient::is_writable)
    }

    // ── gradient selection ────────────────────────────────────────────────

    /// Makes `gradient` the active gradient (or clears it).
    pub fn set_gradient(&mut self, gradient: Option<Gradient>) {
        self.active = match gradient {
            Some(gradient) => ActiveGradient::Stock(gradient),
            None => ActiveGradient::None,
        };
        self.gradient_changed();
    }

    /// Makes the custom gradient the active one.
    pub fn use_custom_gradient(&mut self) {
        self.active = ActiveGradient::Custom;
        self.gradient_changed();
    }

    /// Takes the active gradient out of the editor, e.g. to store it after
    /// an in-place edit. The custom gradient stays put.
    pub fn take_gradient(&mut self) -> Option<Gradient> {
        let taken = match std::mem::replace(&mut self.active, ActiveGradient::None) {
            ActiveGradient::Stock(gradient) => Some(gradient),
            ActiveGradient::Custom => Some(self.custom.clone()),
            ActiveGradient::None => None,
        };
        self.gradient_changed();
        taken
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Attaches a fresh line from `start` to `end` and populates its sliders.
    pub fn start(&mut self, start: Vec2, end: Vec2) {
        self.line = Some(ToolLine::new(start, end));
        self.update_sliders();
        log::debug!("editor started");
    }

    /// Detaches the line and discards the panel.
    pub fn halt(&mut self) {
        self.line = None;
        self.panel = None;
        log::debug!("editor halted");
    }

    // ── transactions ──────────────────────────────────────────────────────

    fn freeze_gradient(&mut self) -> Result<BlockGuard, EditorError> {
        let guard = self.handlers.block();

        let in_place = self.active == ActiveGradient::Custom || self.options.modify_active();
        if in_place {
            if !self.is_gradient_editable() {
                return Err(EditorError::NotWritable);
            }
            self.gradient_mut().ok_or(EditorError::NoGradient)?.freeze();
        } else {
            let ActiveGradient::Stock(stock) = &self.active else {
                return Err(EditorError::NoGradient);
            };
            self.custom.freeze();
            if let Err(err) = self.custom.copy_from(stock) {
                self.custom.thaw();
                return Err(err.into());
            }
            log::debug!("editing a copy of `{}` as `{}`", stock.name(), self.custom.name());
            self.active = ActiveGradient::Custom;
            self.gradient_changed_hints();
        }

        Ok(guard)
    }

    fn thaw_gradient(&mut self, guard: BlockGuard) {
        if let Some(gradient) = self.gradient_mut() {
            if gradient.thaw() {
                log::trace!("`{}` now at revision {}", gradient.name(), gradient.revision());
            }
        }
        self.update_sliders();
        self.update_gui();
        drop(guard);
    }

    /// Runs `edit` against the active gradient inside a freeze/thaw pair.
    ///
    /// A failed edit leaves no trace: the active gradient, the custom
    /// gradient and their revisions are restored to what they were before
    /// the freeze, including a copy-on-edit switch to the custom gradient.
    fn edit_gradient<R>(
        &mut self,
        edit: impl FnOnce(&mut Gradient, &ColorContext) -> Result<R, EditorError>,
    ) -> Result<R, EditorError> {
        let snapshot = (self.active.clone(), self.custom.clone());
        let guard = self.freeze_gradient()?;
        let context = self.context;
        let result = match self.gradient_mut() {
            Some(gradient) => edit(gradient, &context),
            None => Err(EditorError::NoGradient),
        };
        match result {
            Ok(value) => {
                self.thaw_gradient(guard);
                Ok(value)
            }
            Err(err) => {
                self.rollback(snapshot, guard);
                Err(err)
            }
        }
    }

    fn rollback(&mut self, (active, custom): (ActiveGradient, Gradient), guard: BlockGuard) {
        log::debug!("gradient edit failed; restoring previous state");
        self.active = active;
        self.custom = custom;
        self.gradient_changed_hints();
        self.update_sliders();
        self.update_gui();
        drop(guard);
    }

    // ── sync-back ─────────────────────────────────────────────────────────

    /// Rebuilds the line's sliders from the active gradient.
    fn update_sliders(&mut self) {
        if self.line.is_none() || self.options.instant() {
            return;
        }

        let editable = self.is_gradient_editable();
        let offset = self.options.offset_fraction();
        let reversed = self.options.gradient_reverse();
        let sliders = self
            .gradient()
            .map(|gradient| mapper::build_sliders(gradient.segments(), offset, reversed, editable))
            .unwrap_or_default();
        log::debug!("syncing {} sliders to the line", sliders.len());

        // Writing the sliders must not feed back into `line_changed`.
        let _blocked = self.handlers.block();
        if let Some(line) = self.line.as_mut() {
            line.set_sliders(sliders);
        }
    }

    fn endpoint_editor(&self, selection: Handle) -> Option<(&'static str, EndpointEditor)> {
        let line = self.line.as_ref()?;
        let gradient = self.gradient()?;
        let position = line.point(selection)?;

        let handle = if self.options.gradient_reverse() {
            selection.opposite_endpoint()
        } else {
            selection
        };
        let (title, seg, side) = match handle {
            Handle::Start => ("Start Endpoint", gradient.segments().first()?, SegmentSide::Left),
            Handle::End => ("End Endpoint", gradient.segments().last()?, SegmentSide::Right),
            Handle::Slider(_) => return None,
        };
        let (color, color_type) = match side {
            SegmentSide::Left => (seg.left_flat_color(&self.context), seg.left_color_type),
            SegmentSide::Right => (seg.right_flat_color(&self.context), seg.right_color_type),
        };

        Some((
            title,
            EndpointEditor {
                position,
                color,
                color_type,
                sensitive: self.is_gradient_editable(),
            },
        ))
    }

    /// Shows, refreshes or hides the property panel for the current selection.
    fn update_gui(&mut self) {
        let selection = if self.options.instant() || self.gradient().is_none() {
            None
        } else {
            self.selection()
        };

        let Some(selection) = selection else {
            if let Some(panel) = self.panel.as_mut() {
                panel.hide();
            }
            return;
        };

        let endpoint = if selection.is_endpoint() {
            self.endpoint_editor(selection)
        } else {
            None
        };

        let _blocked = self.handlers.block();
        let panel = self.panel.get_or_insert_with(EditorPanel::new);
        match endpoint {
            Some((title, editor)) => {
                panel.title = title.to_owned();
                panel.endpoint = Some(editor);
            }
            None => panel.endpoint = None,
        }
        panel.show();
    }

    /// Selects `handle` on the line, notifying the editor if it changed.
    pub fn select(&mut self, handle: Option<Handle>) {
        let changed = self
            .line
            .as_mut()
            .is_some_and(|line| line.set_selection(handle));
        if changed {
            self.line_selection_changed();
        }
    }

    // ── line events ───────────────────────────────────────────────────────

    /// Routes a line notification to the matching handler.
    pub fn on_line_event(&mut self, event: &LineEvent) -> Result<LineResponse, EditorError> {
        match *event {
            LineEvent::CanAddSlider { value } => Ok(LineResponse::CanAdd(self.line_can_add_slider(value))),
            LineEvent::AddSlider { value } => self.line_add_slider(value).map(LineResponse::Added),
            LineEvent::RemoveSlider { index } => {
                self.line_remove_slider(index)?;
                Ok(LineResponse::Consumed)
            }
            LineEvent::SelectionChanged => {
                self.line_selection_changed();
                Ok(LineResponse::Ignored)
            }
            LineEvent::HandleClicked {
                handle,
                modifiers,
                press,
            } => self.line_handle_clicked(handle, modifiers, press),
            LineEvent::Changed => {
                self.line_changed()?;
                Ok(LineResponse::Ignored)
            }
        }
    }

    /// Whether a stop may be inserted at line value `value`.
    pub fn line_can_add_slider(&self, value: f64) -> bool {
        self.is_gradient_editable() && value >= self.options.offset_fraction()
    }

    /// Inserts a stop at line value `value`; returns the new slider index.
    pub fn line_add_slider(&mut self, value: f64) -> Result<usize, EditorError> {
        let value = mapper::to_segment_value(
            value,
            self.options.offset_fraction(),
            self.options.gradient_reverse(),
        )?;
        self.add_stop(value)
    }

    /// Inserts a stop at segment-space `value`; returns the new slider index.
    pub fn add_stop(&mut self, value: f64) -> Result<usize, EditorError> {
        if !self.is_gradient_editable() {
            log::warn!("refusing to add a stop to a read-only gradient");
            return Err(EditorError::NotWritable);
        }
        self.edit_gradient(|gradient, context| mapper::add_stop_at(gradient, context, value))
    }

    /// Removes the stop slider `index` by merging its two segments.
    pub fn line_remove_slider(&mut self, index: usize) -> Result<(), EditorError> {
        if !self.is_gradient_editable() {
            log::warn!("refusing to remove a stop from a read-only gradient");
            return Err(EditorError::NotWritable);
        }
        let count = self.slider_count();
        if mapper::slider_kind(index, count)? != SliderKind::Stop {
            log::debug!("slider {index} is not a stop; nothing to remove");
            return Ok(());
        }
        self.edit_gradient(|gradient, _| mapper::remove_stop(gradient, index, count))
    }

    pub fn line_selection_changed(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.close_color_dialogs();
        }
        self.update_gui();
    }

    /// Double-clicking a midpoint splits its segment there.
    ///
    /// Never consumes the click, so the new stop can be dragged right away.
    pub fn line_handle_clicked(
        &mut self,
        handle: Handle,
        _modifiers: Modifiers,
        press: PressType,
    ) -> Result<LineResponse, EditorError> {
        let Handle::Slider(index) = handle else {
            return Ok(LineResponse::Ignored);
        };
        let count = self.slider_count();
        if index >= count || mapper::slider_kind(index, count)? != SliderKind::Midpoint {
            return Ok(LineResponse::Ignored);
        }
        if press != PressType::Double || !self.is_gradient_editable() {
            return Ok(LineResponse::Ignored);
        }

        let Some(slider) = self.line.as_ref().map(|line| line.sliders()[index].clone()) else {
            return Ok(LineResponse::Ignored);
        };
        if slider.value > slider.min + EPSILON && slider.value < slider.max - EPSILON {
            let value = mapper::to_segment_value(
                slider.value,
                self.options.offset_fraction(),
                self.options.gradient_reverse(),
            )?;
            let stop = self.add_stop(value)?;
            self.select(Some(Handle::Slider(stop)));
        }

        Ok(LineResponse::Ignored)
    }

    /// Applies the line's slider values to the gradient, typically after a
    /// drag. Midpoints are applied before stops.
    pub fn line_changed(&mut self) -> Result<(), EditorError> {
        if self.handlers.is_blocked() {
            return Ok(());
        }
        if self.options.offset_is_degenerate() {
            log::debug!("offset covers the whole line; ignoring slider changes");
            return Ok(());
        }
        let (Some(gradient), Some(line)) = (self.gradient(), self.line.as_ref()) else {
            return Ok(());
        };
        if line.sliders().is_empty() {
            return Ok(());
        }

        let edits = mapper::plan_sync(
            gradient.segments(),
            line.sliders(),
            self.options.offset_fraction(),
            self.options.gradient_reverse(),
        )?;

        if !edits.is_empty() {
            log::debug!("applying {} slider edits", edits.len());
            self.edit_gradient(|gradient, _| {
                edits.iter().try_for_each(|edit| edit.apply(gradient))
            })?;
        }

        self.update_gui();
        Ok(())
    }

    // ── gradient notifications ────────────────────────────────────────────

    /// The active gradient's contents changed behind the editor's back.
    pub fn gradient_dirty(&mut self) {
        if self.handlers.is_blocked() {
            return;
        }
        if self.line.is_some() {
            self.update_sliders();
            self.select(None);
        }
    }

    /// A different gradient became active.
    pub fn gradient_changed(&mut self) {
        self.gradient_changed_hints();

        if self.handlers.is_blocked() {
            return;
        }
        if self.line.is_some() {
            self.update_sliders();
            self.select(None);
        }
    }

    fn gradient_changed_hints(&mut self) {
        self.hints = OptionsHints {
            modify_active_sensitive: matches!(self.active, ActiveGradient::Stock(_)),
            read_only_hint_visible: self.gradient().is_some_and(|g| !g.is_writable()),
        };
    }

    // ── options ───────────────────────────────────────────────────────────

    /// Reacts to a tool option change (the option itself is already set).
    pub fn options_changed(&mut self, change: OptionChange) {
        match change {
            OptionChange::ModifyActive => {
                self.update_sliders();
                self.update_gui();
            }
            OptionChange::GradientReverse => {
                self.update_sliders();
                if let Some(selection @ (Handle::Start | Handle::End)) = self.selection() {
                    self.select(Some(selection.opposite_endpoint()));
                }
            }
            OptionChange::Offset | OptionChange::Other => self.update_sliders(),
        }
    }

    pub fn set_offset(&mut self, percent: f64) {
        self.options.set_offset(percent);
        self.options_changed(OptionChange::Offset);
    }

    pub fn set_gradient_reverse(&mut self, reverse: bool) {
        if self.options.gradient_reverse() != reverse {
            self.options.set_gradient_reverse(reverse);
            self.options_changed(OptionChange::GradientReverse);
        }
    }

    pub fn set_modify_active(&mut self, modify_active: bool) {
        self.options.set_modify_active(modify_active);
        self.options_changed(OptionChange::ModifyActive);
    }

    pub fn set_instant(&mut self, instant: bool) {
        self.options.set_instant(instant);
        self.options_changed(OptionChange::Other);
        self.update_gui();
    }

    // ── panel events ──────────────────────────────────────────────────────

    pub fn gui_response(&mut self, response: GuiResponse) {
        match response {
            GuiResponse::Close => self.select(None),
        }
    }

    /// The endpoint editor's position fields changed.
    pub fn endpoint_position_changed(&mut self, pos: Vec2) -> Result<(), EditorError> {
        if self.handlers.is_blocked() {
            return Ok(());
        }
        let selection = self.selection();
        let _blocked = self.handlers.block();
        let line = self.line.as_mut().ok_or(EditorError::NoLine)?;
        match selection {
            Some(handle) if handle.is_endpoint() => {
                line.set_point(handle, pos);
                if let Some(editor) = self.panel.as_mut().and_then(|p| p.endpoint.as_mut()) {
                    editor.position = pos;
                }
            }
            other => log::debug!("position edit with {other:?} selected; ignoring"),
        }
        Ok(())
    }

    /// The endpoint editor's color button changed.
    pub fn endpoint_color_changed(&mut self, color: Color) -> Result<(), EditorError> {
        self.color_entry_changed(Direction::None, false, ColorEdit::Color(color))
    }

    /// The endpoint editor's color-type selector changed.
    pub fn endpoint_type_changed(&mut self, color_type: ColorType) -> Result<(), EditorError> {
        self.color_entry_changed(Direction::None, false, ColorEdit::Type(color_type))
    }

    /// A stop's color entry changed. `chained` edits both sides at once.
    pub fn stop_color_changed(
        &mut self,
        direction: Direction,
        chained: bool,
        color: Color,
    ) -> Result<(), EditorError> {
        self.color_entry_changed(direction, chained, ColorEdit::Color(color))
    }

    /// A stop's color-type selector changed. `chained` edits both sides at once.
    pub fn stop_type_changed(
        &mut self,
        direction: Direction,
        chained: bool,
        color_type: ColorType,
    ) -> Result<(), EditorError> {
        self.color_entry_changed(direction, chained, ColorEdit::Type(color_type))
    }

    fn color_entry_changed(
        &mut self,
        direction: Direction,
        chained: bool,
        edit: ColorEdit,
    ) -> Result<(), EditorError> {
        if self.handlers.is_blocked() {
            return Ok(());
        }
        let Some(selection) = self.selection() else {
            return Ok(());
        };
        if !self.is_gradient_editable() {
            log::warn!("refusing to recolor a read-only gradient");
            return Err(EditorError::NotWritable);
        }

        let selection = if self.options.gradient_reverse() {
            selection.opposite_endpoint()
        } else {
            selection
        };
        let count = self.slider_count();
        if let Handle::Slider(index) = selection {
            if mapper::slider_kind(index, count)? != SliderKind::Stop {
                log::debug!("color edit with midpoint {index} selected; ignoring");
                return Ok(());
            }
        }

        self.edit_gradient(|gradient, _| {
            let segment = mapper::resolve_handle(selection, gradient.n_segments(), count)?;
            match selection {
                Handle::Start => edit.apply(gradient, segment, SegmentSide::Left),
                Handle::End => edit.apply(gradient, segment, SegmentSide::Right),
                Handle::Slider(_) => {
                    if direction.edits_left_of_stop(chained) {
                        edit.apply(gradient, segment, SegmentSide::Right)?;
                    }
                    if direction.edits_right_of_stop(chained) {
                        edit.apply(gradient, segment + 1, SegmentSide::Left)?;
                    }
                    Ok(())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use blend_core::paint::GradientError;

    use super::*;
    use crate::line::Slider;

    fn editor_with(gradient: Gradient, options: BlendOptions) -> BlendEditor {
        let mut editor = BlendEditor::new(options, ColorContext::default());
        editor.set_gradient(Some(gradient));
        editor.start(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        editor
    }

    fn two_segments() -> Gradient {
        Gradient::uniform("Stock", &[Color::BLACK, Color::new(1.0, 0.0, 0.0, 1.0), Color::WHITE])
    }

    fn sliders(editor: &BlendEditor) -> &[Slider] {
        editor.line().unwrap().sliders()
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn start_populates_sliders() {
        let editor = editor_with(two_segments(), BlendOptions::new());
        assert_eq!(sliders(&editor).len(), 3);
        assert!(editor.panel().is_none());
    }

    #[test]
    fn instant_mode_skips_sliders() {
        let editor = editor_with(two_segments(), BlendOptions::new().with_instant(true));
        assert!(sliders(&editor).is_empty());
    }

    #[test]
    fn halt_drops_line_and_panel() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        assert!(editor.panel().is_some());
        editor.halt();
        assert!(editor.line().is_none());
        assert!(editor.panel().is_none());
    }

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn first_edit_copies_into_custom() {
        let stock = two_segments().with_writable(false);
        let mut editor = editor_with(stock, BlendOptions::new());
        assert!(editor.is_gradient_editable());
        assert!(editor.hints().read_only_hint_visible);

        let stop = editor.line_add_slider(0.25).unwrap();
        assert_eq!(stop, 0);
        assert!(editor.is_custom_active());
        assert_eq!(editor.custom_gradient().n_segments(), 3);
        assert_eq!(sliders(&editor).len(), 5);
        assert!(!editor.handlers().is_blocked());
        assert!(!editor.hints().modify_active_sensitive);
    }

    #[test]
    fn modify_active_on_read_only_is_refused() {
        let stock = two_segments().with_writable(false);
        let mut editor = editor_with(stock, BlendOptions::new().with_modify_active(true));
        assert!(!editor.is_gradient_editable());
        assert!(!editor.line_can_add_slider(0.5));
        assert_eq!(editor.add_stop(0.25).unwrap_err(), EditorError::NotWritable);
        assert!(sliders(&editor).iter().all(|s| !s.movable));
        assert!(!editor.handlers().is_blocked());
    }

    #[test]
    fn modify_active_edits_in_place() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_modify_active(true));
        editor.add_stop(0.75).unwrap();
        assert!(!editor.is_custom_active());
        assert_eq!(editor.gradient().unwrap().n_segments(), 3);
        assert_eq!(editor.gradient().unwrap().revision(), 1);
    }

    #[test]
    fn can_add_respects_offset() {
        let editor = editor_with(two_segments(), BlendOptions::new().with_offset(40.0));
        assert!(!editor.line_can_add_slider(0.3));
        assert!(editor.line_can_add_slider(0.4));
    }

    #[test]
    fn remove_slider_merges() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.line_remove_slider(0).unwrap();
        assert_eq!(editor.gradient().unwrap().n_segments(), 1);
        assert_eq!(sliders(&editor).len(), 1);
    }

    #[test]
    fn drag_then_changed_moves_stop() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_offset(50.0));
        // stop at 0.5 in gradient space is 0.75 on the line
        assert_eq!(sliders(&editor)[0].value, 0.75);
        editor.line_mut().unwrap().drag_slider(0, 0.6).unwrap();
        editor.line_changed().unwrap();
        let g = editor.gradient().unwrap();
        assert!((g.segments()[0].right - 0.2).abs() < 1e-9);
        assert!((sliders(&editor)[0].value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn changed_without_edits_keeps_stock_active() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.line_changed().unwrap();
        assert!(!editor.is_custom_active());
    }

    #[test]
    fn changed_ignored_at_full_offset() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_offset(100.0));
        editor.line_mut().unwrap().drag_slider(1, 0.0).unwrap();
        editor.line_changed().unwrap();
        assert!(!editor.is_custom_active());
        assert_eq!(editor.line_add_slider(0.5).unwrap_err(), EditorError::DegenerateOffset { offset: 1.0 });
    }

    #[test]
    fn changed_ignored_while_blocked() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.line_mut().unwrap().drag_slider(1, 0.1).unwrap();
        let handlers = editor.handlers().clone();
        let blocked = handlers.block();
        editor.line_changed().unwrap();
        assert_eq!(editor.gradient().unwrap().segments()[0].middle, 0.25);
        drop(blocked);
        editor.line_changed().unwrap();
        assert_eq!(editor.gradient().unwrap().segments()[0].middle, 0.1);
    }

    // ── failed edits ──────────────────────────────────────────────────────

    fn read_only_editor() -> BlendEditor {
        editor_with(two_segments().with_writable(false), BlendOptions::new())
    }

    #[test]
    fn removing_midpoint_changes_nothing() {
        let mut editor = read_only_editor();
        let response = editor.on_line_event(&LineEvent::RemoveSlider { index: 2 }).unwrap();
        assert_eq!(response, LineResponse::Consumed);
        assert!(!editor.is_custom_active());
        assert_eq!(editor.custom_gradient().revision(), 0);
        assert_eq!(editor.gradient().unwrap().revision(), 0);
        assert_eq!(sliders(&editor).len(), 3);
    }

    #[test]
    fn add_on_boundary_keeps_stock_active() {
        let mut editor = read_only_editor();
        assert_eq!(
            editor.on_line_event(&LineEvent::AddSlider { value: 0.5 }),
            Err(EditorError::Gradient(GradientError::SplitOutsideSegment { pos: 0.5 }))
        );
        assert!(!editor.is_custom_active());
        assert_eq!(editor.custom_gradient().revision(), 0);
        assert_eq!(editor.custom_gradient().n_segments(), 1);
        assert!(editor.hints().modify_active_sensitive);
        assert!(!editor.handlers().is_blocked());
    }

    #[test]
    fn out_of_range_remove_keeps_stock_active() {
        let mut editor = read_only_editor();
        assert_eq!(
            editor.on_line_event(&LineEvent::RemoveSlider { index: 9 }),
            Err(EditorError::OutOfRange { index: 9, count: 3 })
        );
        assert!(!editor.is_custom_active());
        assert_eq!(editor.custom_gradient().revision(), 0);
    }

    #[test]
    fn failed_in_place_edit_keeps_revision() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_modify_active(true));
        assert!(editor.add_stop(0.5).is_err());
        let g = editor.gradient().unwrap();
        assert_eq!(g.revision(), 0);
        assert!(!g.is_frozen());
        assert_eq!(g.n_segments(), 2);
    }

    #[test]
    fn failed_edit_on_custom_keeps_revision() {
        let mut editor = read_only_editor();
        editor.add_stop(0.25).unwrap();
        let before = editor.custom_gradient().clone();

        assert!(editor.add_stop(0.25).is_err());
        assert!(editor.is_custom_active());
        assert_eq!(editor.custom_gradient(), &before);
        assert_eq!(sliders(&editor).len(), 5);
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn double_click_midpoint_adds_stop() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        // midpoint of segment 1 sits at 0.75
        let response = editor
            .line_handle_clicked(Handle::Slider(2), Modifiers::default(), PressType::Double)
            .unwrap();
        assert_eq!(response, LineResponse::Ignored);
        assert_eq!(editor.gradient().unwrap().n_segments(), 3);
        assert_eq!(editor.line().unwrap().selection(), Some(Handle::Slider(1)));
        assert!((sliders(&editor)[1].value - 0.75).abs() < 1e-9);
    }

    #[test]
    fn double_click_respects_reversal() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_reverse(true));
        // reversed: segment 1's midpoint (0.75) shows at 0.25
        assert!((sliders(&editor)[2].value - 0.25).abs() < 1e-9);
        editor
            .line_handle_clicked(Handle::Slider(2), Modifiers::default(), PressType::Double)
            .unwrap();
        let g = editor.gradient().unwrap();
        assert!((g.segments()[1].right - 0.75).abs() < 1e-9);
    }

    #[test]
    fn single_click_and_stops_do_nothing() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor
            .line_handle_clicked(Handle::Slider(2), Modifiers::default(), PressType::Single)
            .unwrap();
        editor
            .line_handle_clicked(Handle::Slider(0), Modifiers::default(), PressType::Double)
            .unwrap();
        editor
            .line_handle_clicked(Handle::Start, Modifiers::default(), PressType::Double)
            .unwrap();
        assert_eq!(editor.gradient().unwrap().n_segments(), 2);
    }

    // ── panel ─────────────────────────────────────────────────────────────

    #[test]
    fn selecting_endpoint_fills_panel() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::End));
        let panel = editor.panel().unwrap();
        assert!(panel.visible);
        assert_eq!(panel.title, "End Endpoint");
        let ep = panel.endpoint.as_ref().unwrap();
        assert_eq!(ep.position, Vec2::new(100.0, 0.0));
        assert_eq!(ep.color, Color::WHITE);
        assert!(ep.sensitive);
    }

    #[test]
    fn selecting_stop_hides_endpoint_editor() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        editor.select(Some(Handle::Slider(0)));
        let panel = editor.panel().unwrap();
        assert!(panel.visible);
        assert!(panel.endpoint.is_none());
        assert_eq!(panel.dialogs_closed, 1);
    }

    #[test]
    fn close_response_clears_selection() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        editor.gui_response(GuiResponse::Close);
        assert_eq!(editor.line().unwrap().selection(), None);
        assert!(!editor.panel().unwrap().visible);
    }

    #[test]
    fn reversed_endpoint_colors_swap() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_reverse(true));
        editor.select(Some(Handle::Start));
        let panel = editor.panel().unwrap();
        assert_eq!(panel.title, "End Endpoint");
        assert_eq!(panel.endpoint.as_ref().unwrap().color, Color::WHITE);

        let green = Color::new(0.0, 1.0, 0.0, 1.0);
        editor.endpoint_color_changed(green).unwrap();
        let last = editor.gradient().unwrap().segments().last().unwrap().clone();
        assert_eq!(last.right_color, green);
        assert_eq!(editor.panel().unwrap().endpoint.as_ref().unwrap().color, green);
    }

    #[test]
    fn endpoint_type_resolves_through_context() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        editor.endpoint_type_changed(ColorType::Background).unwrap();
        let ep = editor.panel().unwrap().endpoint.clone().unwrap();
        assert_eq!(ep.color_type, ColorType::Background);
        assert_eq!(ep.color, Color::WHITE);
    }

    #[test]
    fn stop_colors_follow_direction() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Slider(0)));
        let blue = Color::new(0.0, 0.0, 1.0, 1.0);
        editor.stop_color_changed(Direction::Left, false, blue).unwrap();
        let segs = editor.gradient().unwrap().segments().to_vec();
        assert_eq!(segs[0].right_color, blue);
        assert_ne!(segs[1].left_color, blue);

        editor.stop_color_changed(Direction::Right, true, Color::BLACK).unwrap();
        let segs = editor.gradient().unwrap().segments();
        assert_eq!(segs[0].right_color, Color::BLACK);
        assert_eq!(segs[1].left_color, Color::BLACK);
    }

    #[test]
    fn stop_type_edit_on_right_side() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Slider(0)));
        editor
            .stop_type_changed(Direction::Right, false, ColorType::ForegroundTransparent)
            .unwrap();
        let segs = editor.gradient().unwrap().segments();
        assert_eq!(segs[1].left_color_type, ColorType::ForegroundTransparent);
        assert_eq!(segs[0].right_color_type, ColorType::Fixed);
    }

    #[test]
    fn position_edit_moves_endpoint() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        editor.endpoint_position_changed(Vec2::new(10.0, 20.0)).unwrap();
        assert_eq!(editor.line().unwrap().start(), Vec2::new(10.0, 20.0));
        assert!(!editor.handlers().is_blocked());
    }

    // ── options & notifications ───────────────────────────────────────────

    #[test]
    fn reverse_toggle_swaps_endpoint_selection() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Start));
        editor.set_gradient_reverse(true);
        assert_eq!(editor.line().unwrap().selection(), Some(Handle::End));
        assert_eq!(editor.panel().unwrap().title, "Start Endpoint");
    }

    #[test]
    fn offset_change_rebuilds_sliders() {
        let mut editor = editor_with(Gradient::new("g"), BlendOptions::new());
        assert_eq!(sliders(&editor)[0].value, 0.5);
        editor.set_offset(25.0);
        assert_eq!(sliders(&editor)[0].value, 0.625);
    }

    #[test]
    fn gradient_dirty_resyncs_and_deselects() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::Slider(1)));
        editor.gradient_dirty();
        assert_eq!(editor.line().unwrap().selection(), None);
        assert_eq!(sliders(&editor).len(), 3);
    }

    #[test]
    fn set_gradient_none_hides_everything() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        editor.select(Some(Handle::End));
        editor.set_gradient(None);
        assert!(sliders(&editor).is_empty());
        assert!(!editor.panel().unwrap().visible);
        assert!(editor.gradient().is_none());
    }

    #[test]
    fn dispatch_routes_events() {
        let mut editor = editor_with(two_segments(), BlendOptions::new());
        assert_eq!(
            editor.on_line_event(&LineEvent::CanAddSlider { value: 0.3 }).unwrap(),
            LineResponse::CanAdd(true)
        );
        assert_eq!(
            editor.on_line_event(&LineEvent::AddSlider { value: 0.25 }).unwrap(),
            LineResponse::Added(0)
        );
        assert_eq!(
            editor.on_line_event(&LineEvent::RemoveSlider { index: 0 }).unwrap(),
            LineResponse::Consumed
        );
        assert_eq!(editor.gradient().unwrap().n_segments(), 2);
    }

    #[test]
    fn take_gradient_returns_edits() {
        let mut editor = editor_with(two_segments(), BlendOptions::new().with_modify_active(true));
        editor.add_stop(0.25).unwrap();
        let taken = editor.take_gradient().unwrap();
        assert_eq!(taken.n_segments(), 3);
        assert!(editor.gradient().is_none());
        assert!(sliders(&editor).is_empty());
    }
}
