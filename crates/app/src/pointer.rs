//! Mouse polling - turns sampled button/position state into pointer events
//!
//! minifb only exposes the current mouse state, so press, drag and release are
//! recovered by comparing each poll with the previous one.

use painting::PointerEvent;

/// Left-button state seen at the previous poll
#[derive(Debug, Default)]
pub struct MouseState {
    /// Whether the button was held
    pressed: bool,
    /// Last known position in window coordinates
    last_pos: Option<(f32, f32)>,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current sample with the previous one
    ///
    /// A press needs a known position; a release reports the last position
    /// seen. While held, only actual movement produces a move event.
    pub fn poll(&mut self, pos: Option<(f32, f32)>, down: bool) -> Option<PointerEvent> {
        let event = match (self.pressed, down, pos) {
            (false, true, Some((x, y))) => Some(PointerEvent::Down { x, y }),
            (false, true, None) => return None,
            (true, true, Some((x, y))) if self.last_pos != pos => {
                Some(PointerEvent::Move { x, y })
            }
            (true, false, _) => {
                let (x, y) = pos.or(self.last_pos).unwrap_or_default();
                Some(PointerEvent::Up { x, y })
            }
            _ => None,
        };

        self.pressed = down;
        if pos.is_some() {
            self.last_pos = pos;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_drag_release() {
        let mut mouse = MouseState::new();

        assert_eq!(mouse.poll(Some((1.0, 1.0)), false), None);
        assert_eq!(
            mouse.poll(Some((2.0, 3.0)), true),
            Some(PointerEvent::Down { x: 2.0, y: 3.0 })
        );
        assert_eq!(mouse.poll(Some((2.0, 3.0)), true), None);
        assert_eq!(
            mouse.poll(Some((9.0, 3.0)), true),
            Some(PointerEvent::Move { x: 9.0, y: 3.0 })
        );
        assert_eq!(
            mouse.poll(Some((9.0, 3.0)), false),
            Some(PointerEvent::Up { x: 9.0, y: 3.0 })
        );
    }

    #[test]
    fn test_press_without_position_waits() {
        let mut mouse = MouseState::new();

        assert_eq!(mouse.poll(None, true), None);
        // Button still held once the cursor is known again: stroke starts now
        assert_eq!(
            mouse.poll(Some((4.0, 4.0)), true),
            Some(PointerEvent::Down { x: 4.0, y: 4.0 })
        );
    }

    #[test]
    fn test_release_outside_uses_last_position() {
        let mut mouse = MouseState::new();
        mouse.poll(Some((5.0, 6.0)), true);
        mouse.poll(None, true);

        assert_eq!(
            mouse.poll(None, false),
            Some(PointerEvent::Up { x: 5.0, y: 6.0 })
        );
    }
}
