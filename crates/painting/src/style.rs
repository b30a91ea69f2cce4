//! Fixed stroke style and background color resolved from [`CanvasConfig`]

use minipaint_config::CanvasConfig;
use tiny_skia::{Color, LineCap, LineJoin, Paint, Stroke};

use crate::error::PaintError;

/// Stroke paint shared by committed segments and the frame outline
///
/// Built once at canvas construction and never changed afterwards.
#[derive(Debug, Clone)]
pub struct StrokeStyle {
    paint: Paint<'static>,
    stroke: Stroke,
}

impl StrokeStyle {
    /// Build an anti-aliased, round-capped, round-joined style
    pub fn new(color: [f32; 4], width: f32) -> Result<Self, PaintError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PaintError::InvalidStrokeWidth(width));
        }
        let color = to_color("stroke", color)?;

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        Ok(Self { paint, stroke })
    }

    /// Style described by a canvas configuration
    pub fn from_config(config: &CanvasConfig) -> Result<Self, PaintError> {
        Self::new(config.stroke_color, config.stroke_width)
    }

    #[inline]
    pub fn paint(&self) -> &Paint<'static> {
        &self.paint
    }

    #[inline]
    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.stroke.width
    }
}

/// Convert a straight RGBA quadruple to a color, rejecting out-of-range channels
pub(crate) fn to_color(role: &'static str, rgba: [f32; 4]) -> Result<Color, PaintError> {
    Color::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
        .ok_or(PaintError::InvalidColor { role, color: rgba })
}
