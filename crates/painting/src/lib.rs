//! MiniPaint painting core - freehand strokes onto a cached raster
//!
//! This crate provides the drawing surface behind the MiniPaint window:
//! - [`path_builder`] - Trailing-midpoint smoothing with a touch tolerance
//! - [`raster_cache`] - Owned offscreen pixmap holding committed strokes
//! - [`session`] - Idle/Tracking state machine for one stroke at a time
//! - [`compositor`] - Per-repaint blit of the cache plus the frame outline
//! - [`canvas`] - Host-facing facade wiring the above together
//!
//! Nothing here depends on a windowing framework. Hosts call plain methods
//! on [`Canvas`] and receive repaint requests through [`RepaintRequester`].

pub mod canvas;
pub mod compositor;
pub mod error;
pub mod path_builder;
pub mod raster_cache;
pub mod repaint;
pub mod session;
pub mod style;
pub mod types;

pub use canvas::*;
pub use compositor::*;
pub use error::*;
pub use path_builder::*;
pub use raster_cache::*;
pub use repaint::*;
pub use session::*;
pub use style::*;
pub use types::*;
