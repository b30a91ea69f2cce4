//! Stroke lifecycle state machine
//!
//! Pointer events drive the controller between `Idle` and `Tracking`. While
//! tracking, every accepted segment is rasterized into the cache before the
//! repaint request goes out, so a repaint always sees the latest geometry.

use tracing::{debug, trace};

use crate::path_builder::SmoothedPathBuilder;
use crate::raster_cache::RasterCache;
use crate::repaint::RepaintRequester;
use crate::style::StrokeStyle;
use crate::types::{PathElement, PointerEvent, PointerSample, StrokeAnchor};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Tracking,
}

/// Drives one stroke at a time from first contact to release
///
/// Only a single contact is tracked. A pointer-down that arrives while a
/// stroke is already being tracked is ignored and the stroke continues.
#[derive(Debug, Clone)]
pub struct StrokeSessionController {
    builder: SmoothedPathBuilder,
    state: SessionState,
    /// Coordinates of the most recent event handled while tracking
    last_event: Option<PointerSample>,
}

impl StrokeSessionController {
    /// Create an idle controller using the given touch tolerance
    pub fn new(tolerance: f32) -> Self {
        Self {
            builder: SmoothedPathBuilder::new(tolerance),
            state: SessionState::Idle,
            last_event: None,
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    /// Anchor of the stroke in progress
    #[inline]
    pub fn anchor(&self) -> Option<StrokeAnchor> {
        self.builder.anchor()
    }

    /// Path of the stroke in progress
    #[inline]
    pub fn path(&self) -> &[PathElement] {
        self.builder.path()
    }

    /// Coordinates of the last event recorded during the current stroke
    #[inline]
    pub fn last_event(&self) -> Option<PointerSample> {
        self.last_event
    }

    #[inline]
    pub fn builder(&self) -> &SmoothedPathBuilder {
        &self.builder
    }

    /// Dispatch a pointer event to the matching transition
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        cache: &mut RasterCache,
        style: &StrokeStyle,
        repaint: &mut impl RepaintRequester,
    ) {
        let sample = event.sample();
        match event {
            PointerEvent::Down { .. } => self.pointer_down(sample, repaint),
            PointerEvent::Move { .. } => self.pointer_move(sample, cache, style, repaint),
            PointerEvent::Up { .. } => self.pointer_up(sample),
        }
    }

    /// Idle -> Tracking
    pub fn pointer_down(&mut self, sample: PointerSample, repaint: &mut impl RepaintRequester) {
        if self.state == SessionState::Tracking {
            trace!(
                "pointer_down at ({:.1}, {:.1}) while tracking, ignoring",
                sample.x, sample.y
            );
            return;
        }

        debug!("Stroke started at ({:.1}, {:.1})", sample.x, sample.y);
        self.last_event = Some(sample);
        self.builder.begin(sample);
        self.state = SessionState::Tracking;
        repaint.request_repaint();
    }

    /// Tracking -> Tracking
    ///
    /// The repaint is requested whether or not the sample produced geometry.
    pub fn pointer_move(
        &mut self,
        sample: PointerSample,
        cache: &mut RasterCache,
        style: &StrokeStyle,
        repaint: &mut impl RepaintRequester,
    ) {
        if self.state == SessionState::Idle {
            trace!("pointer_move while idle, ignoring");
            return;
        }

        self.last_event = Some(sample);
        if let Some(segment) = self.builder.extend(sample) {
            cache.draw_segment(&segment, style);
        }
        repaint.request_repaint();
    }

    /// Tracking -> Idle
    ///
    /// The cache already holds every committed segment, so no repaint is needed.
    pub fn pointer_up(&mut self, sample: PointerSample) {
        if self.state == SessionState::Idle {
            trace!("pointer_up while idle, ignoring");
            return;
        }

        debug!(
            "Stroke ended at ({:.1}, {:.1}) after {} segments",
            sample.x,
            sample.y,
            self.builder.segment_count()
        );
        self.builder.end();
        self.last_event = None;
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repaint::RepaintCounter;
    use tiny_skia::Color;

    fn setup() -> (StrokeSessionController, RasterCache, StrokeStyle, RepaintCounter) {
        let mut cache = RasterCache::new(Color::WHITE, 40);
        cache.resize(200, 200).unwrap();
        let style = StrokeStyle::new([0.0, 0.0, 0.0, 1.0], 12.0).unwrap();
        (
            StrokeSessionController::new(8.0),
            cache,
            style,
            RepaintCounter::new(),
        )
    }

    fn pixels(cache: &RasterCache) -> Vec<tiny_skia::PremultipliedColorU8> {
        cache.snapshot().unwrap().pixels().to_vec()
    }

    #[test]
    fn test_down_starts_tracking() {
        let (mut session, _cache, _style, mut repaint) = setup();

        session.pointer_down(PointerSample::new(10.0, 10.0), &mut repaint);

        assert_eq!(session.state(), SessionState::Tracking);
        assert_eq!(session.anchor(), Some(PointerSample::new(10.0, 10.0)));
        assert_eq!(repaint.pending(), 1);
    }

    #[test]
    fn test_move_rasterizes_and_repaints() {
        let (mut session, mut cache, style, mut repaint) = setup();
        let before = pixels(&cache);

        session.pointer_down(PointerSample::new(20.0, 100.0), &mut repaint);
        session.pointer_move(PointerSample::new(120.0, 100.0), &mut cache, &style, &mut repaint);

        assert_ne!(pixels(&cache), before);
        assert_eq!(repaint.total(), 2);
        assert_eq!(session.anchor(), Some(PointerSample::new(120.0, 100.0)));
    }

    #[test]
    fn test_suppressed_move_still_repaints() {
        let (mut session, mut cache, style, mut repaint) = setup();
        let before = pixels(&cache);

        session.pointer_down(PointerSample::new(50.0, 50.0), &mut repaint);
        session.pointer_move(PointerSample::new(52.0, 53.0), &mut cache, &style, &mut repaint);
        session.pointer_move(PointerSample::new(45.0, 44.0), &mut cache, &style, &mut repaint);

        assert_eq!(pixels(&cache), before);
        assert_eq!(repaint.total(), 3);
        assert_eq!(session.last_event(), Some(PointerSample::new(45.0, 44.0)));
        assert_eq!(session.anchor(), Some(PointerSample::new(50.0, 50.0)));
    }

    #[test]
    fn test_up_returns_to_idle_without_repaint() {
        let (mut session, mut cache, style, mut repaint) = setup();

        session.pointer_down(PointerSample::new(20.0, 20.0), &mut repaint);
        session.pointer_move(PointerSample::new(60.0, 20.0), &mut cache, &style, &mut repaint);
        let requested = repaint.total();
        session.pointer_up(PointerSample::new(61.0, 20.0));

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.path().is_empty());
        assert_eq!(session.anchor(), None);
        assert_eq!(repaint.total(), requested);
    }

    #[test]
    fn test_events_while_idle_ignored() {
        let (mut session, mut cache, style, mut repaint) = setup();
        let before = pixels(&cache);

        session.pointer_up(PointerSample::new(10.0, 10.0));
        session.pointer_move(PointerSample::new(100.0, 100.0), &mut cache, &style, &mut repaint);

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.path().is_empty());
        assert_eq!(pixels(&cache), before);
        assert_eq!(repaint.total(), 0);
    }

    #[test]
    fn test_second_down_ignored() {
        let (mut session, mut cache, style, mut repaint) = setup();

        session.pointer_down(PointerSample::new(10.0, 10.0), &mut repaint);
        session.pointer_move(PointerSample::new(40.0, 10.0), &mut cache, &style, &mut repaint);
        let path_before = session.path().to_vec();

        session.pointer_down(PointerSample::new(150.0, 150.0), &mut repaint);

        assert_eq!(session.state(), SessionState::Tracking);
        assert_eq!(session.path(), path_before.as_slice());
        assert_eq!(session.anchor(), Some(PointerSample::new(40.0, 10.0)));
        assert_eq!(repaint.total(), 2);
    }

    #[test]
    fn test_handle_event_dispatch() {
        let (mut session, mut cache, style, mut repaint) = setup();

        session.handle_event(PointerEvent::Down { x: 10.0, y: 10.0 }, &mut cache, &style, &mut repaint);
        session.handle_event(PointerEvent::Move { x: 30.0, y: 10.0 }, &mut cache, &style, &mut repaint);
        assert_eq!(session.builder().segment_count(), 1);

        session.handle_event(PointerEvent::Up { x: 30.0, y: 10.0 }, &mut cache, &style, &mut repaint);
        assert_eq!(session.state(), SessionState::Idle);
    }
}
