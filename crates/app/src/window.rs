//! minifb window hosting the canvas
//!
//! The window owns the host-side surface the canvas repaints into and the
//! `0RGB` buffer minifb presents from it.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use tiny_skia::{Pixmap, PixmapMut};

use crate::error::AppError;

pub struct CanvasWindow {
    window: Window,
    /// Surface handed to `Canvas::on_repaint` (None while minimized)
    surface: Option<Pixmap>,
    /// Pixels in the layout minifb expects
    buffer: Vec<u32>,
}

impl CanvasWindow {
    /// Open a resizable window
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, AppError> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| AppError::WindowInit(e.to_string()))?;
        window.set_target_fps(60);

        Ok(Self {
            window,
            surface: None,
            buffer: Vec::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size in pixels
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, clamped to the window
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Reallocate the host surface for a new window size
    /// A zero-sized window leaves no surface to draw into
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface = Pixmap::new(width, height);
        self.buffer.clear();
    }

    /// Mutable view of the surface the canvas repaints into
    pub fn surface_mut(&mut self) -> Option<PixmapMut<'_>> {
        self.surface.as_mut().map(|surface| surface.as_mut())
    }

    /// Push the surface to the screen
    pub fn present(&mut self) -> Result<(), AppError> {
        let Some(surface) = self.surface.as_ref() else {
            self.window.update();
            return Ok(());
        };

        pack_0rgb(surface.data(), &mut self.buffer);
        self.window
            .update_with_buffer(
                &self.buffer,
                surface.width() as usize,
                surface.height() as usize,
            )
            .map_err(|e| AppError::WindowUpdate(e.to_string()))
    }

    /// Pump window events without presenting a new frame
    pub fn update(&mut self) {
        self.window.update();
    }
}

/// Convert RGBA bytes into minifb's 0x00RRGGBB words
///
/// The canvas background is opaque, so premultiplied and straight color agree.
pub fn pack_0rgb(rgba: &[u8], out: &mut Vec<u32>) {
    let pixels: &[[u8; 4]] = bytemuck::cast_slice(rgba);
    out.clear();
    out.extend(
        pixels
            .iter()
            .map(|&[r, g, b, _]| ((r as u32) << 16) | ((g as u32) << 8) | b as u32),
    );
}
