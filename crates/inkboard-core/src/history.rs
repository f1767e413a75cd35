//! Snapshot-based undo/redo.
//!
//! Each entry is a full, independent copy of the scene taken after a
//! completed edit. Undo pops the newest entry onto the redo stack and shows
//! the entry beneath it; redo moves an entry back and shows it.

use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// A deep copy of the scene at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    scene: Scene,
}

impl SceneSnapshot {
    fn capture(scene: &Scene) -> Self {
        Self {
            scene: scene.clone(),
        }
    }

    /// The captured scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

/// What happens to the live scene when undo pops the last remaining entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyUndoPolicy {
    /// Leave the scene showing whatever it showed before the undo.
    #[default]
    KeepScene,
    /// Reset the scene to empty.
    ClearScene,
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The scene was replaced from a history entry.
    Restored,
    /// An entry moved to the redo stack but the scene was left as-is.
    Emptied,
    /// Nothing to do.
    Unchanged,
}

impl HistoryOutcome {
    /// Whether the scene contents may have changed.
    pub fn scene_changed(self) -> bool {
        self == HistoryOutcome::Restored
    }
}

/// Undo and redo stacks (most recent entry last).
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<SceneSnapshot>,
    redo_stack: Vec<SceneSnapshot>,
    max_depth: Option<usize>,
    empty_policy: EmptyUndoPolicy,
}

impl History {
    /// Unlimited history with the default empty-undo policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// History with an optional depth limit and an explicit empty-undo policy.
    pub fn with_settings(max_depth: Option<usize>, empty_policy: EmptyUndoPolicy) -> Self {
        Self {
            max_depth,
            empty_policy,
            ..Self::default()
        }
    }

    /// Record the current scene after a completed edit. Clears redo.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.undo_stack.push(SceneSnapshot::capture(scene));
        self.redo_stack.clear();

        if let Some(max) = self.max_depth {
            while self.undo_stack.len() > max.max(1) {
                self.undo_stack.remove(0);
            }
        }
        log::debug!(
            "history snapshot: undo={} redo={}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
    }

    /// Step back one entry.
    pub fn undo(&mut self, scene: &mut Scene) -> HistoryOutcome {
        let Some(popped) = self.undo_stack.pop() else {
            return HistoryOutcome::Unchanged;
        };
        self.redo_stack.push(popped);

        let outcome = match (self.undo_stack.last(), self.empty_policy) {
            (Some(top), _) => {
                *scene = top.scene.clone();
                HistoryOutcome::Restored
            }
            (None, EmptyUndoPolicy::KeepScene) => HistoryOutcome::Emptied,
            (None, EmptyUndoPolicy::ClearScene) => {
                scene.clear();
                HistoryOutcome::Restored
            }
        };
        log::debug!(
            "undo ({:?}): undo={} redo={}",
            outcome,
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        outcome
    }

    /// Re-apply the most recently undone entry.
    pub fn redo(&mut self, scene: &mut Scene) -> HistoryOutcome {
        let Some(entry) = self.redo_stack.pop() else {
            return HistoryOutcome::Unchanged;
        };
        *scene = entry.scene.clone();
        self.undo_stack.push(entry);
        log::debug!(
            "redo: undo={} redo={}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        HistoryOutcome::Restored
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Newest undo entry, if any.
    pub fn latest(&self) -> Option<&SceneSnapshot> {
        self.undo_stack.last()
    }

    pub fn empty_policy(&self) -> EmptyUndoPolicy {
        self.empty_policy
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::TextAnnotation;
    use kurbo::{Point, Vec2};

    fn scene_with(texts: &[&str]) -> Scene {
        let mut scene = Scene::new();
        for (i, t) in texts.iter().enumerate() {
            scene.add_text(TextAnnotation::new(Point::new(i as f64 * 10.0, 0.0), *t));
        }
        scene
    }

    #[test]
    fn test_undo_redo_restores_identical_scene() {
        let mut history = History::new();
        let mut scene = scene_with(&["A"]);
        history.snapshot(&scene);
        scene.add_text(TextAnnotation::new(Point::new(100.0, 100.0), "B"));
        history.snapshot(&scene);
        let after_b = scene.clone();

        assert_eq!(history.undo(&mut scene), HistoryOutcome::Restored);
        assert_eq!(scene.texts().len(), 1);
        assert_eq!(scene.texts()[0].text, "A");

        assert_eq!(history.redo(&mut scene), HistoryOutcome::Restored);
        assert_eq!(scene, after_b);
    }

    #[test]
    fn test_snapshot_is_independent_of_live_scene() {
        let mut history = History::new();
        let mut scene = scene_with(&["A"]);
        let id = scene.texts()[0].id();
        history.snapshot(&scene);

        scene.translate_text(id, Vec2::new(50.0, 50.0));

        let stored = history.latest().unwrap().scene();
        assert_eq!(stored.text(id).unwrap().position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_new_snapshot_clears_redo() {
        let mut history = History::new();
        let mut scene = scene_with(&["A"]);
        history.snapshot(&scene);
        scene.add_text(TextAnnotation::new(Point::ZERO, "B"));
        history.snapshot(&scene);

        history.undo(&mut scene);
        assert!(history.can_redo());

        scene.add_text(TextAnnotation::new(Point::ZERO, "C"));
        history.snapshot(&scene);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new();
        let mut scene = scene_with(&["A"]);
        assert_eq!(history.undo(&mut scene), HistoryOutcome::Unchanged);
        assert_eq!(history.redo(&mut scene), HistoryOutcome::Unchanged);
        assert_eq!(scene.texts().len(), 1);
    }

    #[test]
    fn test_undo_last_entry_keeps_scene() {
        let mut history = History::new();
        let mut scene = scene_with(&["A"]);
        history.snapshot(&scene);

        assert_eq!(history.undo(&mut scene), HistoryOutcome::Emptied);
        assert_eq!(scene.texts().len(), 1);
        assert!(!history.can_undo());
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_undo_last_entry_clears_scene_when_configured() {
        let mut history = History::with_settings(None, EmptyUndoPolicy::ClearScene);
        let mut scene = scene_with(&["A"]);
        history.snapshot(&scene);

        assert_eq!(history.undo(&mut scene), HistoryOutcome::Restored);
        assert!(scene.is_empty());

        assert_eq!(history.redo(&mut scene), HistoryOutcome::Restored);
        assert_eq!(scene.texts().len(), 1);
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut history = History::with_settings(Some(2), EmptyUndoPolicy::KeepScene);
        let mut scene = Scene::new();
        for label in ["A", "B", "C"] {
            scene.add_text(TextAnnotation::new(Point::ZERO, label));
            history.snapshot(&scene);
        }
        assert_eq!(history.undo_len(), 2);

        history.undo(&mut scene);
        assert_eq!(scene.texts().len(), 2);
        assert_eq!(history.undo(&mut scene), HistoryOutcome::Emptied);
    }

    #[test]
    fn test_redo_after_multiple_undos() {
        let mut history = History::new();
        let mut scene = Scene::new();
        for label in ["A", "B", "C"] {
            scene.add_text(TextAnnotation::new(Point::ZERO, label));
            history.snapshot(&scene);
        }

        history.undo(&mut scene);
        history.undo(&mut scene);
        assert_eq!(scene.texts().len(), 1);

        history.redo(&mut scene);
        assert_eq!(scene.texts().len(), 2);
        history.redo(&mut scene);
        assert_eq!(scene.texts().len(), 3);
        assert_eq!(history.redo(&mut scene), HistoryOutcome::Unchanged);
    }
}
