//! Input Events
//!
//! Mouse event types plus the global pointer capture state. While a source
//! holds capture, all pointer events route to it regardless of hit-testing,
//! which keeps scrollbar thumb drags working when the cursor leaves the
//! thumb bounds.

use crate::primitives::Point;
use crate::source_id::SourceId;

/// Capture state for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No capture - events route based on hit-testing.
    #[default]
    None,

    /// Captured by a specific source.
    /// All pointer events go to this source until released.
    Captured(SourceId),
}

impl CaptureState {
    /// Check if the pointer is currently captured.
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureState::Captured(_))
    }

    /// Get the source that has captured the pointer, if any.
    pub fn captured_by(&self) -> Option<SourceId> {
        match self {
            CaptureState::Captured(source) => Some(*source),
            CaptureState::None => None,
        }
    }

    /// Check if a specific source has captured the pointer.
    pub fn is_captured_by(&self, source: SourceId) -> bool {
        self.captured_by() == Some(source)
    }
}

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Mouse event types.
#[derive(Debug, Clone)]
pub enum MouseEvent {
    /// Mouse button pressed.
    ButtonPressed {
        button: MouseButton,
        position: Point,
    },

    /// Mouse button released.
    ButtonReleased {
        button: MouseButton,
        position: Point,
    },

    /// Mouse cursor moved.
    CursorMoved {
        position: Point,
    },

    /// Mouse cursor entered the window.
    CursorEntered,

    /// Mouse cursor left the window.
    CursorLeft,

    /// Mouse wheel scrolled.
    WheelScrolled {
        delta: ScrollDelta,
        position: Point,
    },
}

impl MouseEvent {
    /// Shorthand for a left button press at the given coordinates.
    pub fn left_press(x: f32, y: f32) -> Self {
        MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a left button release at the given coordinates.
    pub fn left_release(x: f32, y: f32) -> Self {
        MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }
}

/// Scroll delta types.
#[derive(Debug, Clone, Copy)]
pub enum ScrollDelta {
    /// Scroll by lines (discrete, e.g., mouse wheel notches).
    Lines { x: f32, y: f32 },

    /// Scroll by pixels (smooth, e.g., trackpad).
    Pixels { x: f32, y: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_state_is_captured() {
        let none = CaptureState::None;
        assert!(!none.is_captured());
        assert!(none.captured_by().is_none());

        let source = SourceId::new();
        let captured = CaptureState::Captured(source);
        assert!(captured.is_captured());
        assert_eq!(captured.captured_by(), Some(source));
        assert!(captured.is_captured_by(source));
        assert!(!captured.is_captured_by(SourceId::new()));
    }

    #[test]
    fn event_shorthands_carry_position() {
        match MouseEvent::left_press(3.0, 4.0) {
            MouseEvent::ButtonPressed { button, position } => {
                assert_eq!(button, MouseButton::Left);
                assert_eq!(position, Point::new(3.0, 4.0));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
