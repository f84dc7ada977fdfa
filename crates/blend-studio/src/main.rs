use anyhow::{Context, bail};
use blend_core::coords::Vec2;
use blend_core::logging::{LoggingConfig, init_logging};
use blend_core::paint::{Color, ColorContext, ColorType, Gradient};
use blend_editor::prelude::*;

/// Demo options, overridable through `BLEND_OFFSET` (percent) and
/// `BLEND_REVERSE` (`1`/`true`/`yes`).
fn options_from_env() -> anyhow::Result<BlendOptions> {
    let mut options = BlendOptions::new();

    if let Ok(raw) = std::env::var("BLEND_OFFSET") {
        let percent: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("BLEND_OFFSET is not a number: {raw:?}"))?;
        options.set_offset(percent);
        if options.offset_is_degenerate() {
            bail!("BLEND_OFFSET must stay below 100, got {percent}");
        }
    }

    if let Ok(raw) = std::env::var("BLEND_REVERSE") {
        let reverse = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            other => bail!("BLEND_REVERSE must be a boolean, got {other:?}"),
        };
        options.set_gradient_reverse(reverse);
    }

    Ok(options)
}

fn print_sliders(step: &str, editor: &BlendEditor) {
    println!();
    println!("  ── {step}");
    let Some(line) = editor.line() else {
        println!("     (no line)");
        return;
    };
    for (i, s) in line.sliders().iter().enumerate() {
        let at = line.point_at(s.value);
        let kind = match s.kind {
            SliderKind::Stop => "stop",
            SliderKind::Midpoint => "mid ",
        };
        let flags = format!(
            "{}{}{}",
            if s.visible { 'v' } else { '-' },
            if s.movable { 'm' } else { '-' },
            if s.removable { 'r' } else { '-' },
        );
        println!(
            "     [{i:>2}] {kind} seg {:>2}  {:.4}  in [{:.4}, {:.4}]  at ({:>5.1}, {:>5.1})  {flags}",
            s.segment, s.value, s.min, s.max, at.x, at.y
        );
    }
    if let Some(gradient) = editor.gradient() {
        println!(
            "     `{}`: {} segments, revision {}",
            gradient.name(),
            gradient.n_segments(),
            gradient.revision()
        );
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let options = options_from_env()?;
    log::info!(
        "blend studio: offset {}%, reversed {}",
        options.offset(),
        options.gradient_reverse()
    );

    let stock = Gradient::uniform(
        "Sunrise",
        &[
            Color::from_srgb_u8(20, 24, 82, 255),
            Color::from_srgb_u8(235, 94, 40, 255),
            Color::from_srgb_u8(255, 214, 102, 255),
        ],
    )
    .with_writable(false);

    let mut editor = BlendEditor::new(options, ColorContext::default());
    editor.set_gradient(Some(stock));
    editor.start(Vec2::new(32.0, 240.0), Vec2::new(608.0, 240.0));
    print_sliders("started on read-only `Sunrise`", &editor);

    // Click slightly off the line, a third of the way along it.
    let pointer = Vec2::new(224.0, 246.0);
    let value = editor.line().context("editor lost its line")?.value_at(pointer);
    match editor.on_line_event(&LineEvent::CanAddSlider { value })? {
        LineResponse::CanAdd(true) => {
            let response = editor.on_line_event(&LineEvent::AddSlider { value })?;
            if let LineResponse::Added(index) = response {
                editor.select(Some(Handle::Slider(index)));
            }
            print_sliders(&format!("added a stop at line value {value:.4}"), &editor);
        }
        _ => log::warn!("line refused a stop at {value:.4}"),
    }

    if let Some(Handle::Slider(index)) = editor.line().and_then(ToolLine::selection) {
        editor.stop_color_changed(Direction::Left, true, Color::from_srgb_u8(160, 40, 90, 255))?;

        let line = editor.line_mut().context("editor lost its line")?;
        let slider = &line.sliders()[index];
        let target = slider.min + (slider.max - slider.min) * 0.25;
        line.drag_slider(index, target)?;
        editor.on_line_event(&LineEvent::Changed)?;
        print_sliders(&format!("dragged stop {index} to {target:.4}"), &editor);
    }

    // Double-click the last midpoint to split its segment.
    let count = editor.line().map_or(0, |line| line.sliders().len());
    if count > 0 {
        editor.on_line_event(&LineEvent::HandleClicked {
            handle: Handle::Slider(count - 1),
            modifiers: Modifiers::default(),
            press: PressType::Double,
        })?;
        print_sliders("double-clicked the last midpoint", &editor);
    }

    editor.select(Some(Handle::End));
    editor.endpoint_type_changed(ColorType::BackgroundTransparent)?;
    if let Some(endpoint) = editor.panel().and_then(|p| p.endpoint.as_ref()) {
        log::info!(
            "end endpoint at ({:.0}, {:.0}) is now {} ({:?})",
            endpoint.position.x,
            endpoint.position.y,
            endpoint.color_type.label(),
            endpoint.color
        );
    }

    editor.set_gradient_reverse(!editor.options().gradient_reverse());
    print_sliders("toggled reversal", &editor);

    editor.on_line_event(&LineEvent::RemoveSlider { index: 0 })?;
    print_sliders("removed stop 0", &editor);

    editor.gui_response(GuiResponse::Close);
    editor.halt();

    let edited = editor.custom_gradient();
    edited.validate()?;
    log::info!(
        "session done: `{}` has {} segments",
        edited.name(),
        edited.n_segments()
    );
    Ok(())
}
