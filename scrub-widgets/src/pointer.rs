//! Pointer events delivered by the host

/// A pointer event in widget pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the widget
    Enter,
    /// Pointer left the widget
    Leave,
    /// Primary button pressed
    Down { x: f64, y: f64 },
    /// Pointer moved, with or without the button held
    Move { x: f64, y: f64 },
    /// Primary button released
    Up { x: f64, y: f64 },
    /// Wheel notches, positive away from the user
    Wheel { steps: f64 },
}

impl PointerEvent {
    /// Coordinates carried by the event, if any
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Some((x, y))
            }
            _ => None,
        }
    }

    /// Same event moved by `(-dx, -dy)`, for routing into a child widget
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        match self {
            PointerEvent::Down { x, y } => PointerEvent::Down { x: x - dx, y: y - dy },
            PointerEvent::Move { x, y } => PointerEvent::Move { x: x - dx, y: y - dy },
            PointerEvent::Up { x, y } => PointerEvent::Up { x: x - dx, y: y - dy },
            other => other,
        }
    }
}

/// Coarse interaction state shared by the interactive widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Hovering,
    Dragging,
}
