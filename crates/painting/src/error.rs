use thiserror::Error;

/// Errors surfaced to the host by the painting core
///
/// Suppressed samples, ignored pointer events, and repaints before the first
/// resize are ordinary control flow and never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Failed to allocate {width}x{height} raster buffer")]
    AllocationFailure { width: u32, height: u32 },
    #[error("Invalid {role} color: {color:?}")]
    InvalidColor { role: &'static str, color: [f32; 4] },
    #[error("Invalid stroke width: {0}")]
    InvalidStrokeWidth(f32),
    #[error("Invalid frame inset: {0}")]
    InvalidFrameInset(i32),
}
