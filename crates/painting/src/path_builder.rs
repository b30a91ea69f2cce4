//! Trailing-midpoint path smoothing
//!
//! Raw pointer samples are turned into a chain of quadratic curves. Each curve
//! uses the previous sample as its control point and ends halfway to the new
//! sample, which removes the corners that straight polyline segments would
//! show at input-noise frequency. The drawn end of the path therefore always
//! lags one midpoint behind the latest raw sample.

use tracing::trace;

use crate::types::{CurveSegment, PathElement, PointerSample, StrokeAnchor};

/// Builds the smoothed path for one stroke at a time
#[derive(Debug, Clone)]
pub struct SmoothedPathBuilder {
    /// Per-axis movement below which a sample is ignored
    tolerance: f32,
    /// Path elements of the current stroke
    path: Vec<PathElement>,
    /// Last accepted raw sample (None between strokes)
    anchor: Option<StrokeAnchor>,
    /// End of the drawn path, where the next segment starts
    cursor: PointerSample,
}

impl SmoothedPathBuilder {
    /// Create a builder that ignores movement smaller than `tolerance` on both axes
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            path: Vec::new(),
            anchor: None,
            cursor: PointerSample::default(),
        }
    }

    /// Current anchor, None when no stroke is in progress
    #[inline]
    pub fn anchor(&self) -> Option<StrokeAnchor> {
        self.anchor
    }

    /// Elements of the stroke in progress
    #[inline]
    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    /// Endpoint of the drawn path
    /// Returns None when no stroke is in progress
    pub fn drawn_end(&self) -> Option<PointerSample> {
        self.anchor.map(|_| self.cursor)
    }

    /// Number of curve segments appended since `begin`
    pub fn segment_count(&self) -> usize {
        self.path
            .iter()
            .filter(|el| matches!(el, PathElement::QuadTo { .. }))
            .count()
    }

    /// Start a new path at `point`
    pub fn begin(&mut self, point: PointerSample) {
        self.path.clear();
        self.path.push(PathElement::MoveTo(point));
        self.anchor = Some(point);
        self.cursor = point;
    }

    /// Extend the path toward `point`
    ///
    /// Returns the appended segment, or None when the movement from the anchor
    /// is under the tolerance on both axes (or no stroke is in progress). A
    /// rejected sample leaves the builder untouched.
    pub fn extend(&mut self, point: PointerSample) -> Option<CurveSegment> {
        let anchor = self.anchor?;

        let dx = (point.x - anchor.x).abs();
        let dy = (point.y - anchor.y).abs();
        if dx < self.tolerance && dy < self.tolerance {
            trace!(
                "extend: ({:.1}, {:.1}) within tolerance {:.1} of anchor, suppressed",
                point.x, point.y, self.tolerance
            );
            return None;
        }

        let segment = CurveSegment {
            from: self.cursor,
            ctrl: anchor,
            to: anchor.midpoint(point),
        };
        self.path.push(PathElement::QuadTo {
            ctrl: segment.ctrl,
            end: segment.to,
        });
        self.anchor = Some(point);
        self.cursor = segment.to;

        Some(segment)
    }

    /// Finish the stroke
    ///
    /// Every segment has already been handed out by `extend`, so there is
    /// nothing to flush. The tail past the last midpoint stays undrawn.
    pub fn end(&mut self) {
        self.path.clear();
        self.anchor = None;
    }
}
