//! Inkboard Application
//!
//! Command-line shell around the editor: loads configuration and fonts,
//! replays scripted sessions and exports the result.

mod app;
mod config;
mod script;
mod shortcuts;

pub use app::Session;
pub use config::{AppConfig, FontFile};
pub use script::{ControlsUpdate, Script, ScriptedPrompt, Step};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
