//! Editor configuration.

use crate::history::EmptyUndoPolicy;
use crate::hit_test::STROKE_HIT_TOLERANCE;
use crate::style::StyleControls;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which font size sets the vertical extent of a text hit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitBoxHeight {
    /// The font size selected in the controls when the hit test runs.
    #[default]
    CurrentControl,
    /// The font size the annotation was created with.
    OwnSize,
}

/// Tunables for an editing session. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Per-axis distance within which a stroke point counts as hit.
    pub hit_tolerance: f64,
    /// Font size used for the height of text hit boxes.
    pub hit_box_height: HitBoxHeight,
    /// Distance of the underline below the text baseline.
    pub underline_offset: f64,
    /// Width of strokes and underlines.
    pub line_width: f64,
    /// Maximum undo entries kept (`None` = unlimited).
    pub max_history: Option<usize>,
    /// Scene behaviour when undo removes the last entry.
    pub empty_undo: EmptyUndoPolicy,
    /// Tool active at startup.
    pub initial_tool: ToolKind,
    /// Control values at startup.
    pub controls: StyleControls,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: STROKE_HIT_TOLERANCE,
            hit_box_height: HitBoxHeight::CurrentControl,
            underline_offset: 2.0,
            line_width: 2.0,
            max_history: None,
            empty_undo: EmptyUndoPolicy::KeepScene,
            initial_tool: ToolKind::Text,
            controls: StyleControls::default(),
        }
    }
}

impl EditorConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
