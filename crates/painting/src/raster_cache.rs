//! Persistent offscreen raster for committed strokes
//!
//! The cache owns a single RGBA pixmap sized to the visible surface. Strokes
//! are rasterized into it segment by segment; repaints only read it. The
//! pixmap is released before every replacement and on drop, and the
//! allocation/release counts are kept so callers can check for leaks.

use tiny_skia::{
    Color, IntSize, PathBuilder, Pixmap, PixmapRef, PremultipliedColorU8, Transform,
};
use tracing::{debug, info, trace, warn};

use crate::error::PaintError;
use crate::style::StrokeStyle;
use crate::types::{CurveSegment, FrameRect};

/// Buffer lifecycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Pixel buffers allocated so far
    pub allocations: u64,
    /// Pixel buffers released so far
    pub releases: u64,
}

impl CacheStats {
    /// Buffers allocated and not yet released
    #[inline]
    pub fn live_buffers(&self) -> u64 {
        self.allocations - self.releases
    }
}

/// Offscreen pixel buffer holding everything drawn so far
pub struct RasterCache {
    /// Current buffer (None before the first successful resize)
    pixmap: Option<Pixmap>,
    /// Frame rectangle for the current buffer size
    frame: Option<FrameRect>,
    background: Color,
    frame_inset: i32,
    stats: CacheStats,
}

impl std::fmt::Debug for RasterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCache")
            .field("size", &self.size())
            .field("frame", &self.frame)
            .field("stats", &self.stats)
            .finish()
    }
}

impl RasterCache {
    /// Create an empty cache; nothing can be drawn until `resize` succeeds
    pub fn new(background: Color, frame_inset: i32) -> Self {
        Self {
            pixmap: None,
            frame: None,
            background,
            frame_inset,
            stats: CacheStats::default(),
        }
    }

    /// (Re)create the buffer for a `width` x `height` surface
    ///
    /// Non-positive dimensions are rejected and the current buffer is kept. For
    /// valid dimensions the current buffer is released first; if the new one
    /// cannot be allocated the cache stays empty until a later resize works.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), PaintError> {
        if width <= 0 || height <= 0 {
            warn!("RasterCache::resize rejected {}x{}", width, height);
            return Err(PaintError::InvalidDimensions { width, height });
        }
        let (width, height) = (width as u32, height as u32);

        self.release();

        let Some(mut pixmap) = allocate_pixmap(width, height) else {
            warn!("RasterCache::resize failed to allocate {}x{}", width, height);
            return Err(PaintError::AllocationFailure { width, height });
        };
        pixmap.fill(self.background);

        self.stats.allocations += 1;
        self.frame = Some(FrameRect::inset(width, height, self.frame_inset));
        self.pixmap = Some(pixmap);

        info!(
            "RasterCache resized to {}x{} (allocation #{})",
            width, height, self.stats.allocations
        );
        Ok(())
    }

    /// Drop the current buffer, if any
    ///
    /// Safe to call repeatedly; only a live buffer is counted as released.
    pub fn release(&mut self) {
        if let Some(pixmap) = self.pixmap.take() {
            self.stats.releases += 1;
            self.frame = None;
            debug!(
                "RasterCache released {}x{} buffer",
                pixmap.width(),
                pixmap.height()
            );
        }
    }

    /// Rasterize one curve segment into the buffer
    ///
    /// Does nothing when no buffer has been allocated.
    pub fn draw_segment(&mut self, segment: &CurveSegment, style: &StrokeStyle) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            trace!("draw_segment: no buffer, skipping");
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(segment.from.x, segment.from.y);
        pb.quad_to(segment.ctrl.x, segment.ctrl.y, segment.to.x, segment.to.y);
        let Some(path) = pb.finish() else {
            trace!("draw_segment: degenerate segment {:?}", segment);
            return;
        };

        pixmap.stroke_path(
            &path,
            style.paint(),
            style.stroke(),
            Transform::identity(),
            None,
        );
        debug!(
            "draw_segment: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            segment.from.x, segment.from.y, segment.to.x, segment.to.y
        );
    }

    /// Read-only view of the committed pixels
    /// Returns None before the first successful resize
    pub fn snapshot(&self) -> Option<PixmapRef<'_>> {
        self.pixmap.as_ref().map(|pixmap| pixmap.as_ref())
    }

    /// Buffer dimensions, if a buffer exists
    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    /// Frame rectangle for the current buffer
    #[inline]
    pub fn frame(&self) -> Option<FrameRect> {
        self.frame
    }

    /// Get a pixel at the given coordinates
    /// Returns None if there is no buffer or the coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.pixmap.as_ref()?.pixel(x, y)
    }

    /// Background color as stored in the buffer
    pub fn background_pixel(&self) -> PremultipliedColorU8 {
        self.background.premultiply().to_color_u8()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.pixmap.is_some()
    }
}

/// Allocate a zeroed RGBA pixmap, reporting out-of-memory as None
///
/// `Pixmap::new` aborts when the allocator refuses a size it considers valid,
/// so the buffer is reserved fallibly before being handed to tiny-skia.
fn allocate_pixmap(width: u32, height: u32) -> Option<Pixmap> {
    let size = IntSize::from_wh(width, height)?;
    let row_bytes = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .filter(|row| *row <= i32::MAX as usize)?;
    let len = row_bytes.checked_mul(height as usize)?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).ok()?;
    data.resize(len, 0);
    Pixmap::from_vec(data, size)
}

const BYTES_PER_PIXEL: usize = 4;

impl Drop for RasterCache {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointerSample;

    fn white() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }

    fn black_style() -> StrokeStyle {
        StrokeStyle::new([0.0, 0.0, 0.0, 1.0], 12.0).unwrap()
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = RasterCache::new(white(), 40);
        assert!(!cache.is_allocated());
        assert!(cache.snapshot().is_none());
        assert_eq!(cache.frame(), None);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_resize_fills_background() {
        let background = Color::from_rgba8(255, 249, 196, 255);
        let mut cache = RasterCache::new(background, 40);
        cache.resize(100, 100).unwrap();

        let expected = background.premultiply().to_color_u8();
        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.width(), 100);
        assert_eq!(snapshot.height(), 100);
        assert!(snapshot.pixels().iter().all(|p| *p == expected));
    }

    #[test]
    fn test_frame_recomputed() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(300, 200).unwrap();
        assert_eq!(
            cache.frame(),
            Some(FrameRect {
                left: 40,
                top: 40,
                right: 260,
                bottom: 160
            })
        );

        cache.resize(500, 400).unwrap();
        assert_eq!(
            cache.frame(),
            Some(FrameRect {
                left: 40,
                top: 40,
                right: 460,
                bottom: 360
            })
        );
    }

    #[test]
    fn test_resize_counts_buffers() {
        let mut cache = RasterCache::new(white(), 40);
        for n in 1..=5 {
            cache.resize(50 + n, 60).unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.allocations, 5);
        assert_eq!(stats.releases, 4);
        assert_eq!(stats.live_buffers(), 1);

        cache.release();
        assert_eq!(cache.stats().releases, 5);
        assert_eq!(cache.stats().live_buffers(), 0);

        // Second release must not count twice
        cache.release();
        assert_eq!(cache.stats().releases, 5);
    }

    #[test]
    fn test_invalid_dimensions_keep_buffer() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(120, 80).unwrap();

        assert_eq!(
            cache.resize(0, 80),
            Err(PaintError::InvalidDimensions {
                width: 0,
                height: 80
            })
        );
        assert_eq!(
            cache.resize(120, -1),
            Err(PaintError::InvalidDimensions {
                width: 120,
                height: -1
            })
        );

        assert_eq!(cache.size(), Some((120, 80)));
        assert_eq!(cache.stats().allocations, 1);
        assert_eq!(cache.stats().releases, 0);
    }

    #[test]
    fn test_allocation_failure_disables_drawing() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(64, 64).unwrap();

        // Byte size overflows what a pixmap may address
        let err = cache.resize(i32::MAX, i32::MAX).unwrap_err();
        assert!(matches!(err, PaintError::AllocationFailure { .. }));
        assert!(!cache.is_allocated());
        assert_eq!(cache.frame(), None);
        assert_eq!(cache.stats().live_buffers(), 0);

        let segment = CurveSegment {
            from: PointerSample::new(0.0, 0.0),
            ctrl: PointerSample::new(10.0, 10.0),
            to: PointerSample::new(20.0, 20.0),
        };
        cache.draw_segment(&segment, &black_style());
        assert!(cache.snapshot().is_none());

        cache.resize(64, 64).unwrap();
        assert!(cache.is_allocated());
    }

    #[test]
    fn test_out_of_memory_reported() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(32, 32).unwrap();

        // Passes tiny-skia's size checks but no allocator can satisfy it
        assert_eq!(
            cache.resize(400_000_000, 400_000_000),
            Err(PaintError::AllocationFailure {
                width: 400_000_000,
                height: 400_000_000
            })
        );
        assert!(!cache.is_allocated());
        assert!(cache.snapshot().is_none());
        assert_eq!(cache.stats().allocations, 1);
        assert_eq!(cache.stats().live_buffers(), 0);
    }

    #[test]
    fn test_draw_segment_marks_pixels() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(100, 100).unwrap();
        let background = cache.background_pixel();

        let segment = CurveSegment {
            from: PointerSample::new(10.0, 50.0),
            ctrl: PointerSample::new(50.0, 50.0),
            to: PointerSample::new(90.0, 50.0),
        };
        cache.draw_segment(&segment, &black_style());

        let on_line = cache.pixel(50, 50).unwrap();
        assert_ne!(on_line, background);
        assert_eq!(on_line.red(), 0);

        // Far from the 12px stroke
        assert_eq!(cache.pixel(50, 5), Some(background));
    }

    #[test]
    fn test_resize_discards_drawing() {
        let mut cache = RasterCache::new(white(), 40);
        cache.resize(100, 100).unwrap();
        let segment = CurveSegment {
            from: PointerSample::new(10.0, 50.0),
            ctrl: PointerSample::new(50.0, 50.0),
            to: PointerSample::new(90.0, 50.0),
        };
        cache.draw_segment(&segment, &black_style());

        cache.resize(100, 100).unwrap();
        let background = cache.background_pixel();
        assert_eq!(cache.pixel(50, 50), Some(background));
    }
}
