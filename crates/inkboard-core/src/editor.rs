//! Editing session: interprets pointer events against the current tool.
//!
//! The `Editor` owns the scene, history, tool mode, interaction state and
//! style controls. Handlers never fail; each returns an [`EditOutcome`]
//! telling the host whether to redraw.

use crate::config::{EditorConfig, HitBoxHeight};
use crate::hit_test::{self, ApproximateMeasurer, TextMeasurer};
use crate::history::{History, HistoryOutcome};
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::shapes::{EntityRef, TextAnnotation};
use crate::style::StyleControls;
use crate::tools::{CursorIcon, DragTarget, Interaction, Phase, ToolKind};
use kurbo::Point;

/// Source of text for the text tool. `None` means the user cancelled.
pub trait TextPrompt {
    fn request_text(&mut self) -> Option<String>;
}

impl<F: FnMut() -> Option<String>> TextPrompt for F {
    fn request_text(&mut self) -> Option<String> {
        self()
    }
}

/// A prompt that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl TextPrompt for NoPrompt {
    fn request_text(&mut self) -> Option<String> {
        None
    }
}

/// Effect of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing visible changed.
    Unchanged,
    /// The scene changed and should be redrawn.
    Redraw,
    /// The scene changed and a history entry was recorded.
    Committed,
}

impl EditOutcome {
    pub fn needs_redraw(self) -> bool {
        self != EditOutcome::Unchanged
    }
}

/// Single owned editing session.
pub struct Editor {
    scene: Scene,
    history: History,
    tool: ToolKind,
    interaction: Interaction,
    controls: StyleControls,
    config: EditorConfig,
    measurer: Box<dyn TextMeasurer>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor measuring text with [`ApproximateMeasurer`].
    pub fn new(config: EditorConfig) -> Self {
        Self::with_measurer(config, Box::new(ApproximateMeasurer::default()))
    }

    /// Create an editor with a specific text measurer.
    pub fn with_measurer(config: EditorConfig, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            scene: Scene::new(),
            history: History::with_settings(config.max_history, config.empty_undo),
            tool: config.initial_tool,
            interaction: Interaction::Idle,
            controls: config.controls.clone(),
            config,
            measurer,
        }
    }

    /// Replace the text measurer (e.g. once fonts are loaded).
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    pub fn controls(&self) -> &StyleControls {
        &self.controls
    }

    /// Mutable access to the style controls. Changes affect text created
    /// afterwards and every stroke at its next render.
    pub fn controls_mut(&mut self) -> &mut StyleControls {
        &mut self.controls
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn phase(&self) -> Phase {
        self.interaction.phase()
    }

    /// The entity currently held by a drag, if any.
    pub fn selection(&self) -> Option<EntityRef> {
        self.interaction.selection()
    }

    /// Cursor the host should display.
    pub fn cursor(&self) -> CursorIcon {
        match self.interaction {
            Interaction::Dragging(_) => CursorIcon::Move,
            _ => self.tool.cursor(),
        }
    }

    /// Switch tools. Ends any in-progress interaction first.
    pub fn set_tool(&mut self, tool: ToolKind) -> EditOutcome {
        let outcome = self.finish_interaction();
        if self.tool != tool {
            log::debug!("tool: {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
        }
        outcome
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent, prompt: &mut dyn TextPrompt) -> EditOutcome {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, prompt),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    /// Pointer pressed at `position`.
    pub fn pointer_down(&mut self, position: Point, prompt: &mut dyn TextPrompt) -> EditOutcome {
        match self.tool {
            ToolKind::Text => self.place_text(position, prompt),
            ToolKind::Brush => self.begin_stroke(position),
            ToolKind::Select => self.begin_drag(position),
        }
    }

    /// Pointer moved to `position`.
    pub fn pointer_move(&mut self, position: Point) -> EditOutcome {
        match self.interaction {
            Interaction::Idle => EditOutcome::Unchanged,
            Interaction::Drawing { .. } => {
                if self.scene.append_to_last_stroke(position) {
                    EditOutcome::Redraw
                } else {
                    EditOutcome::Unchanged
                }
            }
            Interaction::Dragging(DragTarget::Text { id, offset }) => {
                if self.scene.set_text_position(id, position - offset) {
                    EditOutcome::Redraw
                } else {
                    EditOutcome::Unchanged
                }
            }
            Interaction::Dragging(DragTarget::Stroke { id }) => {
                let Some(stroke) = self.scene.stroke_mut(id) else {
                    return EditOutcome::Unchanged;
                };
                let delta = position - stroke.first();
                stroke.translate(delta);
                stroke.set_first(position);
                EditOutcome::Redraw
            }
        }
    }

    /// Pointer released. Drags are not recorded in history; a finished
    /// brush stroke is.
    pub fn pointer_up(&mut self, _position: Point) -> EditOutcome {
        self.finish_interaction()
    }

    /// Step back one history entry.
    pub fn undo(&mut self) -> EditOutcome {
        self.interaction = Interaction::Idle;
        Self::history_outcome(self.history.undo(&mut self.scene))
    }

    /// Re-apply the most recently undone entry.
    pub fn redo(&mut self) -> EditOutcome {
        self.interaction = Interaction::Idle;
        Self::history_outcome(self.history.redo(&mut self.scene))
    }

    /// Index of the first text annotation under `point`.
    pub fn find_text_at(&self, point: Point) -> Option<usize> {
        let height = match self.config.hit_box_height {
            HitBoxHeight::CurrentControl => Some(self.controls.font_size),
            HitBoxHeight::OwnSize => None,
        };
        hit_test::find_text_at(&self.scene, point, self.measurer.as_ref(), height)
    }

    /// Index of the first stroke with a point near `point`.
    pub fn find_stroke_at(&self, point: Point) -> Option<usize> {
        hit_test::find_stroke_at(&self.scene, point, self.config.hit_tolerance)
    }

    fn history_outcome(outcome: HistoryOutcome) -> EditOutcome {
        if outcome.scene_changed() {
            EditOutcome::Redraw
        } else {
            EditOutcome::Unchanged
        }
    }

    fn place_text(&mut self, position: Point, prompt: &mut dyn TextPrompt) -> EditOutcome {
        let text = match prompt.request_text() {
            Some(text) if !text.is_empty() => text,
            _ => {
                log::debug!("text input empty or cancelled");
                return EditOutcome::Unchanged;
            }
        };
        let annotation = TextAnnotation::from_controls(position, text, &self.controls);
        log::info!(
            "text added at ({}, {}) with font {:?}",
            position.x,
            position.y,
            annotation.font.css()
        );
        self.scene.add_text(annotation);
        self.history.snapshot(&self.scene);
        EditOutcome::Committed
    }

    fn begin_stroke(&mut self, position: Point) -> EditOutcome {
        // A missed pointer-up must not leave the previous stroke unrecorded.
        self.finish_interaction();
        let stroke = self.scene.add_stroke(position);
        log::debug!("stroke {} started at ({}, {})", stroke, position.x, position.y);
        self.interaction = Interaction::Drawing { stroke };
        EditOutcome::Redraw
    }

    fn begin_drag(&mut self, position: Point) -> EditOutcome {
        let target = if let Some(index) = self.find_text_at(position) {
            let text = &self.scene.texts()[index];
            DragTarget::Text {
                id: text.id(),
                offset: position - text.position,
            }
        } else if let Some(index) = self.find_stroke_at(position) {
            DragTarget::Stroke {
                id: self.scene.strokes()[index].id(),
            }
        } else {
            return EditOutcome::Unchanged;
        };
        log::debug!("drag started: {:?}", target.entity());
        self.interaction = Interaction::Dragging(target);
        EditOutcome::Unchanged
    }

    fn finish_interaction(&mut self) -> EditOutcome {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => EditOutcome::Unchanged,
            Interaction::Drawing { stroke } => {
                log::debug!("stroke {} finished", stroke);
                self.history.snapshot(&self.scene);
                EditOutcome::Committed
            }
            Interaction::Dragging(target) => {
                log::debug!("drag ended: {:?}", target.entity());
                EditOutcome::Unchanged
            }
        }
    }
}
