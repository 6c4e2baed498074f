//! Input events and pointer tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

/// A pointer, wheel or keyboard event. Positions are in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown {
        position: Point,
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        button: MouseButton,
    },
    Wheel {
        position: Point,
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Left-button press without modifiers.
    pub fn down(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    /// Left-button release.
    pub fn up(x: f64, y: f64) -> Self {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        InputEvent::Key {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Screen position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position, .. }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position, .. }
            | InputEvent::Wheel { position, .. } => Some(*position),
            InputEvent::Key { .. } => None,
        }
    }
}

/// Tracks pointer position and modifiers across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Pointer position before the latest event.
    pub previous_pointer_position: Point,
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event before it is dispatched.
    pub fn record(&mut self, event: &InputEvent) {
        if let Some(position) = event.position() {
            self.previous_pointer_position = self.pointer_position;
            self.pointer_position = position;
        }
        match event {
            InputEvent::PointerDown { modifiers, .. } | InputEvent::Key { modifiers, .. } => {
                self.modifiers = *modifiers;
            }
            InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. } | InputEvent::Wheel { .. } => {}
        }
    }

    /// Pointer movement between the last two positioned events.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}
