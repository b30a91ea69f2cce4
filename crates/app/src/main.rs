//! MiniPaint - freehand drawing in a resizable window
//!
//! Hold the left mouse button to draw. Escape quits.

mod config;
mod error;
mod pointer;
mod window;

use painting::{Canvas, PaintError, RepaintCounter};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, WINDOW_TITLE};
use error::AppError;
use pointer::MouseState;
use window::CanvasWindow;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    info!(
        "Starting MiniPaint at {}x{} (tolerance {:.1}px)",
        config.display.width, config.display.height, config.canvas.touch_tolerance
    );

    let mut window = CanvasWindow::new(
        WINDOW_TITLE,
        config.display.scaled_width() as usize,
        config.display.scaled_height() as usize,
    )?;
    let mut canvas = Canvas::new(&config.canvas, RepaintCounter::new())?;
    let mut mouse = MouseState::new();
    let mut last_size = (0, 0);

    while window.is_open() {
        let mut needs_present = false;

        let size = window.size();
        if size != last_size {
            last_size = size;
            let (width, height) = (size.0 as u32, size.1 as u32);
            window.resize_surface(width, height);
            match canvas.on_surface_resized(width as i32, height as i32) {
                Ok(()) => needs_present = true,
                // Minimized windows report zero size; keep the old cache until restored
                Err(e @ PaintError::InvalidDimensions { .. }) => {
                    warn!("Surface resize skipped: {e}")
                }
                // Drawing stays disabled until the next size change allocates
                Err(e) => error!("Surface resize failed: {e}"),
            }
        }

        if let Some(event) = mouse.poll(window.mouse_pos(), window.left_mouse_down()) {
            canvas.handle_pointer(event);
        }

        if canvas.repaint_mut().take() || needs_present {
            if let Some(mut surface) = window.surface_mut() {
                canvas.on_repaint(&mut surface);
            }
            window.present()?;
        } else {
            window.update();
        }
    }

    canvas.shutdown();
    info!(
        "MiniPaint closed after {} buffer allocations",
        canvas.cache().stats().allocations
    );
    Ok(())
}
