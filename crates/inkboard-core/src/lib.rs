//! Inkboard Core Library
//!
//! Platform-agnostic scene model, history and interaction logic for the
//! Inkboard drawing surface.

pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod style;
pub mod tools;

pub use config::{ConfigError, EditorConfig, HitBoxHeight};
pub use editor::{EditOutcome, Editor, NoPrompt, TextPrompt};
pub use history::{EmptyUndoPolicy, History, HistoryOutcome, SceneSnapshot};
pub use hit_test::{ApproximateMeasurer, TextMeasurer, find_stroke_at, find_text_at};
pub use input::{KeyPress, Modifiers, PointerEvent};
pub use scene::Scene;
pub use shapes::{EntityId, EntityRef, Stroke, TextAnnotation};
pub use style::{FontSlant, FontSpec, FontWeight, LineStyle, Rgba8Color, StyleControls};
pub use tools::{CursorIcon, DragTarget, Interaction, Phase, ToolKind};
