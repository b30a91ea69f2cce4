//! Host-facing drawing surface
//!
//! [`Canvas`] ties the pieces together behind the plain method calls a host
//! adapter makes:
//! - `on_surface_resized` rebuilds the raster cache
//! - `on_pointer_down` / `on_pointer_move` / `on_pointer_up` drive the stroke
//! - `on_repaint` composites the cache and frame onto the host surface
//!
//! The canvas has no dependency on any windowing framework; repaint requests
//! go out through a [`RepaintRequester`] supplied by the host.

use minipaint_config::CanvasConfig;
use tiny_skia::PixmapMut;
use tracing::debug;

use crate::compositor::CompositorView;
use crate::error::PaintError;
use crate::raster_cache::RasterCache;
use crate::repaint::RepaintRequester;
use crate::session::StrokeSessionController;
use crate::style::{to_color, StrokeStyle};
use crate::types::{PointerEvent, PointerSample};

/// Freehand drawing surface driven by host events
pub struct Canvas<R: RepaintRequester> {
    view: CompositorView,
    session: StrokeSessionController,
    style: StrokeStyle,
    repaint: R,
}

impl<R: RepaintRequester> Canvas<R> {
    /// Build a canvas from its configuration
    ///
    /// Fails if the configured colors or stroke width cannot form a style, or
    /// if the frame inset is negative.
    pub fn new(config: &CanvasConfig, repaint: R) -> Result<Self, PaintError> {
        if config.frame_inset < 0 {
            return Err(PaintError::InvalidFrameInset(config.frame_inset));
        }
        let style = StrokeStyle::from_config(config)?;
        let background = to_color("background", config.background_color)?;
        let cache = RasterCache::new(background, config.frame_inset);

        debug!(
            "Canvas created: stroke width {:.1}, tolerance {:.1}, inset {}",
            config.stroke_width, config.touch_tolerance, config.frame_inset
        );

        Ok(Self {
            view: CompositorView::new(cache, style.clone()),
            session: StrokeSessionController::new(config.touch_tolerance),
            style,
            repaint,
        })
    }

    pub fn on_surface_resized(&mut self, width: i32, height: i32) -> Result<(), PaintError> {
        self.view.on_surface_resized(width, height)
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.session
            .pointer_down(PointerSample::new(x, y), &mut self.repaint);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.session.pointer_move(
            PointerSample::new(x, y),
            self.view.cache_mut(),
            &self.style,
            &mut self.repaint,
        );
    }

    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        self.session.pointer_up(PointerSample::new(x, y));
    }

    /// Single entry point for pointer input
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.session.handle_event(
            event,
            self.view.cache_mut(),
            &self.style,
            &mut self.repaint,
        );
    }

    pub fn on_repaint(&self, surface: &mut PixmapMut<'_>) {
        self.view.on_repaint(surface);
    }

    /// Release the raster buffer; the canvas draws nothing until resized again
    pub fn shutdown(&mut self) {
        self.view.shutdown();
    }

    #[inline]
    pub fn cache(&self) -> &RasterCache {
        self.view.cache()
    }

    #[inline]
    pub fn session(&self) -> &StrokeSessionController {
        &self.session
    }

    #[inline]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    #[inline]
    pub fn repaint(&self) -> &R {
        &self.repaint
    }

    #[inline]
    pub fn repaint_mut(&mut self) -> &mut R {
        &mut self.repaint
    }
}
