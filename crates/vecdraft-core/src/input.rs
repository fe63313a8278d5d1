//! Pointer input events and tracked pointer state.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Abort the gesture in progress (escape key).
    Cancel,
    /// End an open-ended gesture (double click or enter key).
    Finish,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Cancel | PointerEvent::Finish => None,
        }
    }
}

/// Tracks the pointer across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position in world coordinates.
    pub pointer_position: Point,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position of an event. Events without a position leave it
    /// untouched.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        if let Some(position) = event.position() {
            self.pointer_position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_pointer_position() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert_eq!(input.pointer_position, Point::new(100.0, 100.0));
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));

        input.handle_pointer_event(&PointerEvent::Finish);
        input.handle_pointer_event(&PointerEvent::Cancel);
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"Down": {"position": {"x": 1.0, "y": 2.0}}}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
            }
        );
        let cancel: PointerEvent = serde_json::from_str(r#""Cancel""#).unwrap();
        assert_eq!(cancel, PointerEvent::Cancel);
    }
}
