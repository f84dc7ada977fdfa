use std::f64::consts::PI;

use super::color::{Color, Hsv};

/// Positions closer than this are considered equal.
pub const EPSILON: f64 = 1e-10;

/// Where an endpoint's color comes from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColorType {
    /// The color stored on the segment.
    #[default]
    Fixed,
    Foreground,
    ForegroundTransparent,
    Background,
    BackgroundTransparent,
}

impl ColorType {
    /// Human-readable label, as shown by the color-type selector.
    pub fn label(self) -> &'static str {
        match self {
            ColorType::Fixed => "Fixed",
            ColorType::Foreground => "Foreground color",
            ColorType::ForegroundTransparent => "Foreground color (transparent)",
            ColorType::Background => "Background color",
            ColorType::BackgroundTransparent => "Background color (transparent)",
        }
    }

    /// Resolves `stored` against the context's foreground/background.
    pub fn resolve(self, stored: Color, ctx: &ColorContext) -> Color {
        match self {
            ColorType::Fixed => stored,
            ColorType::Foreground => ctx.foreground,
            ColorType::ForegroundTransparent => ctx.foreground.with_alpha(0.0),
            ColorType::Background => ctx.background,
            ColorType::BackgroundTransparent => ctx.background.with_alpha(0.0),
        }
    }
}

/// Foreground/background pair that non-fixed endpoint colors resolve against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorContext {
    pub foreground: Color,
    pub background: Color,
}

impl Default for ColorContext {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

/// Shape of the interpolation between a segment's two endpoint colors.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendFunction {
    #[default]
    Linear,
    Curved,
    Sine,
    SphereIncreasing,
    SphereDecreasing,
    Step,
}

impl BlendFunction {
    /// Blend factor in `[0, 1]` for the relative position `pos` given the
    /// relative midpoint `middle` (both already normalized to the segment).
    pub fn factor(self, middle: f64, pos: f64) -> f64 {
        match self {
            BlendFunction::Linear => linear_factor(middle, pos),
            BlendFunction::Curved => {
                let middle = middle.max(EPSILON);
                pos.powf(0.5f64.ln() / middle.ln())
            }
            BlendFunction::Sine => {
                let pos = linear_factor(middle, pos);
                ((-PI / 2.0 + PI * pos).sin() + 1.0) / 2.0
            }
            BlendFunction::SphereIncreasing => {
                let pos = linear_factor(middle, pos) - 1.0;
                (1.0 - pos * pos).max(0.0).sqrt()
            }
            BlendFunction::SphereDecreasing => {
                let pos = linear_factor(middle, pos);
                1.0 - (1.0 - pos * pos).max(0.0).sqrt()
            }
            BlendFunction::Step => {
                if pos >= middle {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Piecewise-linear ramp that maps `middle` to one half.
fn linear_factor(middle: f64, pos: f64) -> f64 {
    if pos <= middle {
        if middle < EPSILON { 0.0 } else { 0.5 * pos / middle }
    } else {
        let rest = 1.0 - middle;
        if rest < EPSILON {
            1.0
        } else {
            0.5 + 0.5 * (pos - middle) / rest
        }
    }
}

/// Color space the blend factor is applied in.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColoringMode {
    #[default]
    Rgb,
    /// HSV, hue travelling counter-clockwise (increasing).
    HsvCcw,
    /// HSV, hue travelling clockwise (decreasing).
    HsvCw,
}

impl ColoringMode {
    pub fn mix(self, left: Color, right: Color, factor: f64) -> Color {
        match self {
            ColoringMode::Rgb => left.lerp(right, factor),
            ColoringMode::HsvCcw | ColoringMode::HsvCw => {
                let l = left.to_hsv();
                let r = right.to_hsv();
                let h = if self == ColoringMode::HsvCcw {
                    let span = if l.h < r.h { r.h - l.h } else { 1.0 - (l.h - r.h) };
                    (l.h + span * factor).rem_euclid(1.0)
                } else {
                    let span = if r.h < l.h { l.h - r.h } else { 1.0 - (r.h - l.h) };
                    (l.h - span * factor).rem_euclid(1.0)
                };
                Color::from_hsv(Hsv {
                    h,
                    s: l.s + (r.s - l.s) * factor,
                    v: l.v + (r.v - l.v) * factor,
                    a: l.a + (r.a - l.a) * factor,
                })
            }
        }
    }
}

/// One contiguous interval of a gradient.
///
/// Invariant (maintained by [`super::Gradient`]): `left <= middle <= right`,
/// and adjacent segments share their boundary exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSegment {
    pub left: f64,
    pub middle: f64,
    pub right: f64,
    pub left_color: Color,
    pub left_color_type: ColorType,
    pub right_color: Color,
    pub right_color_type: ColorType,
    pub blend: BlendFunction,
    pub coloring: ColoringMode,
}

impl GradientSegment {
    /// Fixed-color linear RGB segment with a centered midpoint.
    pub fn new(left: f64, right: f64, left_color: Color, right_color: Color) -> Self {
        Self {
            left,
            middle: (left + right) / 2.0,
            right,
            left_color,
            left_color_type: ColorType::Fixed,
            right_color,
            right_color_type: ColorType::Fixed,
            blend: BlendFunction::Linear,
            coloring: ColoringMode::Rgb,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// `true` when `pos` lies strictly inside the segment, away from both ends.
    #[inline]
    pub fn strictly_contains(&self, pos: f64) -> bool {
        pos > self.left + EPSILON && pos < self.right - EPSILON
    }

    pub fn left_flat_color(&self, ctx: &ColorContext) -> Color {
        self.left_color_type.resolve(self.left_color, ctx)
    }

    pub fn right_flat_color(&self, ctx: &ColorContext) -> Color {
        self.right_color_type.resolve(self.right_color, ctx)
    }

    /// Color at absolute position `pos`, which should lie inside the segment.
    pub fn color_at(&self, ctx: &ColorContext, pos: f64) -> Color {
        let len = self.width();
        let (middle, pos) = if len < EPSILON {
            (0.5, 0.5)
        } else {
            (
                (self.middle - self.left) / len,
                ((pos - self.left) / len).clamp(0.0, 1.0),
            )
        };
        let factor = self.blend.factor(middle, pos);
        self.coloring
            .mix(self.left_flat_color(ctx), self.right_flat_color(ctx), factor)
    }
}
