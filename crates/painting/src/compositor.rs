//! Repaint compositing: cached strokes first, then the frame decoration

use tiny_skia::{PathBuilder, PixmapMut, PixmapPaint, Transform};
use tracing::trace;

use crate::error::PaintError;
use crate::raster_cache::RasterCache;
use crate::style::StrokeStyle;

/// Produces the visible image from the raster cache
///
/// Owns the cache. The frame outline is drawn fresh on every repaint and is
/// never baked into the cache.
#[derive(Debug)]
pub struct CompositorView {
    cache: RasterCache,
    frame_style: StrokeStyle,
}

impl CompositorView {
    pub fn new(cache: RasterCache, frame_style: StrokeStyle) -> Self {
        Self { cache, frame_style }
    }

    #[inline]
    pub fn cache(&self) -> &RasterCache {
        &self.cache
    }

    #[inline]
    pub fn cache_mut(&mut self) -> &mut RasterCache {
        &mut self.cache
    }

    /// The visible surface changed size
    pub fn on_surface_resized(&mut self, width: i32, height: i32) -> Result<(), PaintError> {
        self.cache.resize(width, height)
    }

    /// Draw the cache at the origin, then the frame outline on top
    ///
    /// Nothing is drawn until the cache has been sized successfully.
    pub fn on_repaint(&self, surface: &mut PixmapMut<'_>) {
        let Some(snapshot) = self.cache.snapshot() else {
            trace!("on_repaint: cache not allocated, nothing to draw");
            return;
        };

        surface.draw_pixmap(
            0,
            0,
            snapshot,
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        if let Some(rect) = self.cache.frame().and_then(|frame| frame.to_rect()) {
            let path = PathBuilder::from_rect(rect);
            surface.stroke_path(
                &path,
                self.frame_style.paint(),
                self.frame_style.stroke(),
                Transform::identity(),
                None,
            );
        }
    }

    /// Release the cache buffer ahead of shutdown
    pub fn shutdown(&mut self) {
        self.cache.release();
    }
}
