use serde::{Deserialize, Serialize};

/// A raw pointer position in surface-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Last committed point of the stroke in progress
pub type StrokeAnchor = PointerSample;

/// One element of a stroke path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo(PointerSample),
    QuadTo {
        ctrl: PointerSample,
        end: PointerSample,
    },
}

/// A quadratic segment that can be rasterized on its own
///
/// `from` is where the path stood before the segment was appended, so the
/// segment carries everything needed to stroke it without the rest of the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub from: PointerSample,
    pub ctrl: PointerSample,
    pub to: PointerSample,
}

/// Decorative frame rectangle, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameRect {
    /// Rectangle inset by `inset` from every edge of a `width` x `height` surface
    pub fn inset(width: u32, height: u32, inset: i32) -> Self {
        Self {
            left: inset,
            top: inset,
            right: (width as i32).saturating_sub(inset),
            bottom: (height as i32).saturating_sub(inset),
        }
    }

    /// Convert to a drawable rectangle
    /// Returns None when the inset swallows the whole surface
    pub fn to_rect(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_ltrb(
            self.left as f32,
            self.top as f32,
            self.right as f32,
            self.bottom as f32,
        )
    }
}

/// Single-contact pointer input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

impl PointerEvent {
    /// Position carried by the event
    pub fn sample(&self) -> PointerSample {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                PointerSample::new(x, y)
            }
        }
    }
}
