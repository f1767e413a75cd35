//! Scripted sessions: a JSON list of input steps replayed against the editor.
//!
//! ```json
//! [
//!   { "action": "controls", "color": "#ff0000", "underline": true },
//!   { "action": "down", "x": 40, "y": 80, "input": "Hello" },
//!   { "action": "tool", "tool": "brush" },
//!   { "action": "down", "x": 10, "y": 10 },
//!   { "action": "move", "x": 60, "y": 40 },
//!   { "action": "up", "x": 60, "y": 40 },
//!   { "action": "key", "chord": "ctrl+z" },
//!   { "action": "export" }
//! ]
//! ```

use inkboard_core::config::ConfigError;
use inkboard_core::editor::TextPrompt;
use inkboard_core::input::PointerEvent;
use inkboard_core::style::{LineStyle, Rgba8Color, StyleControls};
use inkboard_core::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Partial update of the style controls. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsUpdate {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<Rgba8Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub line_style: Option<LineStyle>,
}

impl ControlsUpdate {
    pub fn apply(&self, controls: &mut StyleControls) {
        if let Some(family) = &self.font_family {
            controls.font_family = family.clone();
        }
        if let Some(size) = self.font_size {
            controls.font_size = size;
        }
        if let Some(color) = self.color {
            controls.color = color;
        }
        if let Some(bold) = self.bold {
            controls.bold = bold;
        }
        if let Some(italic) = self.italic {
            controls.italic = italic;
        }
        if let Some(underline) = self.underline {
            controls.underline = underline;
        }
        if let Some(line_style) = self.line_style {
            controls.line_style = line_style;
        }
    }
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Tool {
        tool: ToolKind,
    },
    /// Pointer press. `input` answers the text prompt; absent means cancel.
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        input: Option<String>,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Key {
        chord: String,
    },
    Controls(ControlsUpdate),
    Undo,
    Redo,
    Export,
}

impl Step {
    /// Pointer event for pointer steps.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match *self {
            Step::Down { x, y, .. } => Some(PointerEvent::Down {
                position: Point::new(x, y),
            }),
            Step::Move { x, y } => Some(PointerEvent::Move {
                position: Point::new(x, y),
            }),
            Step::Up { x, y } => Some(PointerEvent::Up {
                position: Point::new(x, y),
            }),
            _ => None,
        }
    }

    /// Text-prompt answer carried by a pointer press.
    pub fn prompt_answer(&self) -> Option<String> {
        match self {
            Step::Down { input, .. } => input.clone(),
            _ => None,
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Answers a single text prompt with a pre-recorded value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answer: Option<String>,
}

impl ScriptedPrompt {
    pub fn new(answer: Option<String>) -> Self {
        Self { answer }
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request_text(&mut self) -> Option<String> {
        self.answer.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let script = Script::from_json(
            r#"[
                { "action": "tool", "tool": "select" },
                { "action": "down", "x": 1, "y": 2, "input": "hi" },
                { "action": "down", "x": 3, "y": 4 },
                { "action": "key", "chord": "ctrl+z" },
                { "action": "controls", "line_style": "dotted" },
                { "action": "undo" }
            ]"#,
        )
        .unwrap();

        assert_eq!(script.len(), 6);
        assert_eq!(script.steps[0], Step::Tool { tool: ToolKind::Select });
        assert_eq!(
            script.steps[1],
            Step::Down {
                x: 1.0,
                y: 2.0,
                input: Some("hi".to_string())
            }
        );
        assert!(matches!(script.steps[2], Step::Down { input: None, .. }));
        assert_eq!(
            script.steps[4],
            Step::Controls(ControlsUpdate {
                line_style: Some(LineStyle::Dotted),
                ..Default::default()
            })
        );
        assert_eq!(script.steps[5], Step::Undo);
    }

    #[test]
    fn test_only_presses_carry_prompt_answers() {
        let down = Step::Down {
            x: 0.0,
            y: 0.0,
            input: Some("note".to_string()),
        };
        assert_eq!(down.prompt_answer().as_deref(), Some("note"));
        assert!(matches!(down.pointer_event(), Some(PointerEvent::Down { .. })));

        let up = Step::Up { x: 0.0, y: 0.0 };
        assert_eq!(up.prompt_answer(), None);
        assert_eq!(Step::Undo.prompt_answer(), None);
        assert_eq!(Step::Undo.pointer_event(), None);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(Script::from_json(r#"[{ "action": "erase" }]"#).is_err());
    }

    #[test]
    fn test_controls_update_keeps_absent_fields() {
        let mut controls = StyleControls {
            bold: true,
            ..Default::default()
        };
        ControlsUpdate {
            font_size: Some(32.0),
            color: Some(Rgba8Color::white()),
            ..Default::default()
        }
        .apply(&mut controls);

        assert!(controls.bold);
        assert_eq!(controls.font_size, 32.0);
        assert_eq!(controls.color, Rgba8Color::white());
        assert_eq!(controls.font_family, "Arial");
    }

    #[test]
    fn test_scripted_prompt_answers_once() {
        let mut prompt = ScriptedPrompt::new(Some("note".to_string()));
        assert_eq!(prompt.request_text().as_deref(), Some("note"));
        assert_eq!(prompt.request_text(), None);
    }
}
