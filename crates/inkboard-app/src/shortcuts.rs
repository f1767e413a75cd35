//! Keyboard shortcut registry and documentation.

use inkboard_core::input::KeyPress;
use inkboard_core::tools::ToolKind;

/// Action bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    SelectTool(ToolKind),
    Export,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub command: Command,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        command: Command,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            command,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Ctrl and Cmd are interchangeable; Shift must match exactly.
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.is_key(self.key)
            && press.modifiers.command() == self.ctrl
            && press.modifiers.shift == self.shift
            && !press.modifiers.alt
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", Command::Undo),
            Shortcut::new("Z", true, true, "Redo", Command::Redo),
            Shortcut::new("Y", true, false, "Redo", Command::Redo),
            Shortcut::new("B", false, false, "Brush tool", Command::SelectTool(ToolKind::Brush)),
            Shortcut::new("T", false, false, "Text tool", Command::SelectTool(ToolKind::Text)),
            Shortcut::new("V", false, false, "Select tool", Command::SelectTool(ToolKind::Select)),
            Shortcut::new("E", true, false, "Export to PNG", Command::Export),
        ]
    }

    /// Command bound to a key press, if any.
    pub fn lookup(press: &KeyPress) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(press))
            .map(|shortcut| shortcut.command)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
