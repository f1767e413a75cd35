//! Session shell: couples the editor with the raster renderer and routes
//! scripted input, shortcuts and exports.

use crate::config::AppConfig;
use crate::script::{Script, ScriptedPrompt, Step};
use crate::shortcuts::{Command, ShortcutRegistry};
use anyhow::{Context, Result};
use inkboard_core::editor::{EditOutcome, Editor};
use inkboard_core::input::KeyPress;
use inkboard_render::{FontBook, RasterRenderer, RenderContext, Renderer, export_to_dir};
use kurbo::Size;
use std::path::PathBuf;

/// A running editing session with its drawing surface.
pub struct Session {
    editor: Editor,
    renderer: RasterRenderer,
    config: AppConfig,
    exports: Vec<PathBuf>,
}

impl Session {
    /// Create a session. Text is measured with the same fonts it is drawn with.
    pub fn new(config: AppConfig, fonts: FontBook) -> Result<Self> {
        let editor = Editor::with_measurer(config.editor.clone(), Box::new(fonts.clone()));
        let renderer = RasterRenderer::new(config.width, config.height)
            .context("failed to create drawing surface")?
            .with_fonts(fonts);
        let mut session = Self {
            editor,
            renderer,
            config,
            exports: Vec::new(),
        };
        session.redraw()?;
        Ok(session)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn renderer(&self) -> &RasterRenderer {
        &self.renderer
    }

    /// Paths written by exports so far.
    pub fn exports(&self) -> &[PathBuf] {
        &self.exports
    }

    /// Replay every step of a script in order.
    pub fn run(&mut self, script: &Script) -> Result<()> {
        for (index, step) in script.steps.iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("step {} ({step:?}) failed", index + 1))?;
        }
        Ok(())
    }

    /// Apply one step, redrawing if the scene changed.
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        let outcome = match step {
            Step::Tool { tool } => self.editor.set_tool(*tool),
            Step::Down { .. } | Step::Move { .. } | Step::Up { .. } => {
                let Some(event) = step.pointer_event() else {
                    return Ok(());
                };
                let mut prompt = ScriptedPrompt::new(step.prompt_answer());
                self.editor.handle_pointer(event, &mut prompt)
            }
            Step::Key { chord } => {
                let press = KeyPress::parse(chord)
                    .with_context(|| format!("invalid key chord {chord:?}"))?;
                return self.handle_key(&press);
            }
            Step::Controls(update) => {
                update.apply(self.editor.controls_mut());
                // Strokes pick up color and line style at render time.
                EditOutcome::Redraw
            }
            Step::Undo => self.editor.undo(),
            Step::Redo => self.editor.redo(),
            Step::Export => {
                self.export()?;
                EditOutcome::Unchanged
            }
        };
        if outcome.needs_redraw() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Run the command bound to a key press. Unbound keys are ignored.
    pub fn handle_key(&mut self, press: &KeyPress) -> Result<()> {
        let Some(command) = ShortcutRegistry::lookup(press) else {
            log::debug!("no shortcut for {press:?}");
            return Ok(());
        };
        let outcome = match command {
            Command::Undo => self.editor.undo(),
            Command::Redo => self.editor.redo(),
            Command::SelectTool(tool) => self.editor.set_tool(tool),
            Command::Export => {
                self.export()?;
                EditOutcome::Unchanged
            }
        };
        if outcome.needs_redraw() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Fully redraw the scene onto the surface.
    pub fn redraw(&mut self) -> Result<()> {
        let editor_config = self.editor.config();
        let ctx = RenderContext::new(
            self.editor.scene(),
            Size::new(self.config.width as f64, self.config.height as f64),
        )
        .with_background(self.config.background.into())
        .with_controls(self.editor.controls())
        .with_metrics(editor_config.line_width, editor_config.underline_offset);
        self.renderer.render(&ctx).context("render failed")
    }

    /// Write the current surface to `canvas.png` in the output directory.
    pub fn export(&mut self) -> Result<PathBuf> {
        let path = export_to_dir(self.renderer.pixmap(), &self.config.output_dir)
            .with_context(|| format!("export to {} failed", self.config.output_dir.display()))?;
        self.exports.push(path.clone());
        Ok(path)
    }

    /// End any in-progress interaction, as a host does when it loses focus.
    pub fn finish(&mut self) -> Result<()> {
        let tool = self.editor.tool();
        if self.editor.set_tool(tool).needs_redraw() {
            self.redraw()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::style::Rgba8Color;
    use inkboard_core::tools::{Phase, ToolKind};

    fn session_in(dir: &std::path::Path) -> Session {
        let config = AppConfig {
            width: 120,
            height: 80,
            output_dir: dir.to_path_buf(),
            ..Default::default()
        };
        Session::new(config, FontBook::new()).unwrap()
    }

    fn run(session: &mut Session, json: &str) {
        session.run(&Script::from_json(json).unwrap()).unwrap();
    }

    fn alpha_at(session: &Session, x: u32, y: u32) -> u8 {
        session.renderer().pixmap().pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn test_brush_stroke_is_drawn_and_undone() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        run(
            &mut session,
            r#"[
                { "action": "key", "chord": "b" },
                { "action": "down", "x": 10, "y": 40 },
                { "action": "move", "x": 100, "y": 40 },
                { "action": "up", "x": 100, "y": 40 }
            ]"#,
        );
        assert_eq!(session.editor().scene().strokes().len(), 1);
        assert!(alpha_at(&session, 50, 39) > 0);

        run(&mut session, r#"[{ "action": "key", "chord": "ctrl+z" }]"#);
        assert_eq!(session.editor().history().undo_len(), 0);
        assert_eq!(session.editor().history().redo_len(), 1);
    }

    #[test]
    fn test_text_uses_scripted_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        run(
            &mut session,
            r##"[
                { "action": "controls", "underline": true, "color": "#0000ff" },
                { "action": "down", "x": 10, "y": 30, "input": "Hi" },
                { "action": "down", "x": 60, "y": 30 }
            ]"##,
        );
        let texts = session.editor().scene().texts();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "Hi");
        assert_eq!(texts[0].color, Rgba8Color::new(0, 0, 255, 255));
        assert!(texts[0].underlined);
        // Underline two units below the baseline.
        assert!(alpha_at(&session, 12, 31) > 0);
    }

    #[test]
    fn test_export_step_and_shortcut_write_canvas_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        run(
            &mut session,
            r#"[{ "action": "export" }, { "action": "key", "chord": "ctrl+e" }]"#,
        );
        assert_eq!(session.exports().len(), 2);
        assert_eq!(session.exports()[0], dir.path().join("canvas.png"));
        assert!(dir.path().join("canvas.png").exists());
    }

    #[test]
    fn test_finish_commits_open_stroke() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        run(
            &mut session,
            r#"[
                { "action": "tool", "tool": "brush" },
                { "action": "down", "x": 5, "y": 5 },
                { "action": "move", "x": 30, "y": 5 }
            ]"#,
        );
        assert_eq!(session.editor().phase(), Phase::Drawing);
        session.finish().unwrap();
        assert_eq!(session.editor().phase(), Phase::Idle);
        assert_eq!(session.editor().tool(), ToolKind::Brush);
        assert_eq!(session.editor().history().undo_len(), 1);
    }

    #[test]
    fn test_bad_chord_reports_step() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        let script = Script::from_json(r#"[{ "action": "key", "chord": "ctrl+" }]"#).unwrap();
        let err = session.run(&script).unwrap_err();
        assert!(format!("{err:#}").contains("step 1"));
    }
}
