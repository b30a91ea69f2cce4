//! Shared configuration for MiniPaint
//!
//! This crate provides the single source of truth for window dimensions,
//! canvas style, and input tolerance shared between the painting core and
//! whatever host drives it.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 800;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default stroke width in pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;

/// Default inset of the decorative frame from each surface edge
pub const DEFAULT_FRAME_INSET: i32 = 40;

/// Platform touch slop in density-independent pixels
pub const TOUCH_SLOP_DP: f32 = 8.0;

/// Default paint color, #FFEB3B
pub const DEFAULT_STROKE_COLOR: [f32; 4] = [1.0, 235.0 / 255.0, 59.0 / 255.0, 1.0];

/// Default canvas background color, #FFF9C4
pub const DEFAULT_BACKGROUND_COLOR: [f32; 4] = [1.0, 249.0 / 255.0, 196.0 / 255.0, 1.0];

/// Display configuration for window and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Scale factor for DPI scaling
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Get scaled width (for physical pixel calculations)
    pub fn scaled_width(&self) -> u32 {
        (self.width as f32 * self.scale) as u32
    }

    /// Get scaled height (for physical pixel calculations)
    pub fn scaled_height(&self) -> u32 {
        (self.height as f32 * self.scale) as u32
    }
}

/// Canvas style and input configuration
///
/// Colors are straight (non-premultiplied) RGBA in 0.0-1.0. Everything here is
/// fixed for the lifetime of a canvas; hosts resolve theme colors once and
/// pass them in at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct CanvasConfig {
    /// Stroke width in pixels
    pub stroke_width: f32,
    /// Stroke color [r, g, b, a]
    pub stroke_color: [f32; 4],
    /// Background color the cache is cleared to [r, g, b, a]
    pub background_color: [f32; 4],
    /// Minimum per-axis movement before a pointer sample extends the path
    pub touch_tolerance: f32,
    /// Inset of the decorative frame from the surface edges
    pub frame_inset: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: DEFAULT_STROKE_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            touch_tolerance: TOUCH_SLOP_DP,
            frame_inset: DEFAULT_FRAME_INSET,
        }
    }
}

impl CanvasConfig {
    /// Touch slop in physical pixels for a display with the given density scale
    pub fn touch_tolerance_for_density(scale: f32) -> f32 {
        (TOUCH_SLOP_DP * scale.max(0.0)).round()
    }

    /// Replace the touch tolerance with the platform slop for `scale`
    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.touch_tolerance = Self::touch_tolerance_for_density(scale);
        self
    }
}
