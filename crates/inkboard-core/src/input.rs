//! Pointer and keyboard input events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

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
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in surface-local coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// A key press with the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Key name, e.g. "z" or "Escape". Letters are matched case-insensitively.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Parse a chord such as `"ctrl+shift+z"`.
    pub fn parse(chord: &str) -> Option<Self> {
        let mut modifiers = Modifiers::default();
        let mut key = None;
        for part in chord.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                "" => return None,
                _ => key = Some(part.to_string()),
            }
        }
        key.map(|key| Self { key, modifiers })
    }

    /// Case-insensitive key comparison.
    pub fn is_key(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_position() {
        let event = PointerEvent::Move {
            position: Point::new(3.0, 4.0),
        };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_parse_chord() {
        let press = KeyPress::parse("Ctrl+Shift+Z").unwrap();
        assert!(press.modifiers.ctrl);
        assert!(press.modifiers.shift);
        assert!(press.is_key("z"));

        let plain = KeyPress::parse("b").unwrap();
        assert_eq!(plain.modifiers, Modifiers::default());

        assert!(KeyPress::parse("ctrl+").is_none());
        assert!(KeyPress::parse("ctrl+shift").is_none());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"down","position":{"x":1.0,"y":2.0}}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0)
            }
        );
    }
}
