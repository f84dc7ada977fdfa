use blend_core::coords::Vec2;
use blend_core::logging::{LoggingConfig, init_logging};
use blend_core::paint::{Color, ColorContext, ColorType, Gradient};
use blend_editor::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn red() -> Color {
    Color::new(1.0, 0.0, 0.0, 1.0)
}

fn stock() -> Gradient {
    Gradient::uniform("Black, Red, White", &[Color::BLACK, red(), Color::WHITE]).with_writable(false)
}

fn started(options: BlendOptions, gradient: Gradient) -> BlendEditor {
    init_logging(LoggingConfig::for_tests());
    let mut editor = BlendEditor::new(options, ColorContext::default());
    editor.set_gradient(Some(gradient));
    editor.start(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    editor
}

fn slider_values(editor: &BlendEditor) -> Vec<f64> {
    editor.line().unwrap().sliders().iter().map(|s| s.value).collect()
}

#[test]
fn add_then_remove_restores_stock_chain() {
    let original = stock();
    let mut editor = started(BlendOptions::new(), original.clone());

    let added = editor.on_line_event(&LineEvent::AddSlider { value: 0.25 }).unwrap();
    assert_eq!(added, LineResponse::Added(0));
    assert!(editor.is_custom_active());
    assert_eq!(editor.line().unwrap().sliders().len(), 5);

    editor.on_line_event(&LineEvent::RemoveSlider { index: 0 }).unwrap();
    assert_eq!(editor.gradient().unwrap().segments(), original.segments());
    assert_eq!(editor.gradient().unwrap().name(), "Custom");
    assert!(!editor.handlers().is_blocked());
}

#[test]
fn drag_under_offset_and_reversal() {
    let options = BlendOptions::new().with_offset(20.0).with_reverse(true);
    let mut editor = started(options, stock());

    let values = slider_values(&editor);
    assert!((values[0] - 0.6).abs() < TOLERANCE);

    editor.line_mut().unwrap().drag_slider(0, 0.7).unwrap();
    editor.on_line_event(&LineEvent::Changed).unwrap();

    let segs = editor.gradient().unwrap().segments();
    assert!((segs[0].right - 0.375).abs() < TOLERANCE);
    assert!((segs[1].left - 0.375).abs() < TOLERANCE);
    assert!((slider_values(&editor)[0] - 0.7).abs() < TOLERANCE);
    editor.gradient().unwrap().validate().unwrap();
}

#[test]
fn midpoint_drag_leaves_stops_alone() {
    let mut editor = started(BlendOptions::new(), stock());
    editor.line_mut().unwrap().drag_slider(2, 0.9).unwrap();
    editor.line_changed().unwrap();

    let segs = editor.gradient().unwrap().segments();
    assert!((segs[1].middle - 0.9).abs() < TOLERANCE);
    assert_eq!(segs[0].right, 0.5);
    assert_eq!(segs[0].middle, 0.25);
}

#[test]
fn endpoint_panel_follows_reversal() {
    let mut editor = started(BlendOptions::new(), stock());
    editor.select(Some(Handle::Start));
    {
        let panel = editor.panel().unwrap();
        assert_eq!(panel.title, "Start Endpoint");
        assert_eq!(panel.endpoint.as_ref().unwrap().color, Color::BLACK);
    }

    editor.set_gradient_reverse(true);
    assert_eq!(editor.line().unwrap().selection(), Some(Handle::End));
    let panel = editor.panel().unwrap();
    assert_eq!(panel.title, "Start Endpoint");
    let endpoint = panel.endpoint.as_ref().unwrap();
    assert_eq!(endpoint.color, Color::BLACK);
    assert_eq!(endpoint.position, Vec2::new(100.0, 0.0));
}

#[test]
fn read_only_in_place_then_copy() {
    let mut editor = started(BlendOptions::new().with_modify_active(true), stock());
    assert_eq!(
        editor.hints(),
        OptionsHints {
            modify_active_sensitive: true,
            read_only_hint_visible: true,
        }
    );

    editor.select(Some(Handle::Start));
    assert!(!editor.panel().unwrap().endpoint.as_ref().unwrap().sensitive);
    assert_eq!(editor.endpoint_color_changed(red()), Err(EditorError::NotWritable));
    assert!(!editor.handlers().is_blocked());
    assert_eq!(editor.gradient().unwrap().segments()[0].left_color, Color::BLACK);

    editor.set_modify_active(false);
    editor.endpoint_type_changed(ColorType::Foreground).unwrap();
    assert!(editor.is_custom_active());
    assert!(!editor.hints().modify_active_sensitive);
    assert_eq!(
        editor.gradient().unwrap().segments()[0].left_color_type,
        ColorType::Foreground
    );
}

#[test]
fn double_click_then_drag_new_stop() {
    let mut editor = started(BlendOptions::new(), stock());
    let response = editor
        .on_line_event(&LineEvent::HandleClicked {
            handle: Handle::Slider(1),
            modifiers: Modifiers::default(),
            press: PressType::Double,
        })
        .unwrap();
    assert!(!response.is_consumed());
    assert_eq!(editor.line().unwrap().selection(), Some(Handle::Slider(0)));

    // The new stop sits at 0.25; drag it right up to its neighbour.
    editor.line_mut().unwrap().drag_slider(0, 0.4).unwrap();
    editor.line_changed().unwrap();
    let segs = editor.gradient().unwrap().segments();
    assert_eq!(segs.len(), 3);
    assert!((segs[0].right - 0.4).abs() < TOLERANCE);
    assert_eq!(segs[1].right, 0.5);
}

#[test]
fn instant_mode_hides_panel_and_freezes_sliders() {
    let mut editor = started(BlendOptions::new(), stock());
    editor.select(Some(Handle::End));
    assert!(editor.panel().unwrap().visible);

    editor.set_instant(true);
    assert!(!editor.panel().unwrap().visible);
    editor.set_offset(50.0);
    assert_eq!(slider_values(&editor)[0], 0.5);

    editor.set_instant(false);
    assert_eq!(slider_values(&editor)[0], 0.75);
    assert!(editor.panel().unwrap().visible);
}

#[test]
fn panel_close_and_halt() {
    let mut editor = started(BlendOptions::new(), stock());
    editor.select(Some(Handle::Slider(0)));
    editor.gui_response(GuiResponse::Close);
    assert_eq!(editor.line().unwrap().selection(), None);

    editor.halt();
    assert!(editor.line().is_none());
    assert_eq!(editor.line_changed(), Ok(()));
    assert_eq!(
        editor.endpoint_position_changed(Vec2::zero()),
        Err(EditorError::NoLine)
    );
}

#[test]
fn refused_edits_leave_stock_untouched() {
    let original = stock();
    let mut editor = started(BlendOptions::new(), original.clone());

    // Midpoint removal is a no-op; everything else here is refused.
    editor.on_line_event(&LineEvent::RemoveSlider { index: 2 }).unwrap();
    assert!(editor.on_line_event(&LineEvent::AddSlider { value: 0.5 }).is_err());
    assert!(editor.on_line_event(&LineEvent::RemoveSlider { index: 9 }).is_err());
    assert!(editor.line_mut().unwrap().drag_slider(0, f64::NAN).is_err());
    editor.line_changed().unwrap();

    assert!(!editor.is_custom_active());
    assert_eq!(editor.gradient().unwrap(), &original);
    assert_eq!(editor.custom_gradient().revision(), 0);
    assert_eq!(slider_values(&editor), vec![0.5, 0.25, 0.75]);
    assert!(!editor.handlers().is_blocked());
}
