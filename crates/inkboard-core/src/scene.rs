//! Scene store: the ordered text and stroke collections.

use crate::shapes::{EntityId, Stroke, TextAnnotation};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// All drawable content, in insertion order.
///
/// Mutations are structural only; callers are responsible for semantic
/// checks such as rejecting empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    texts: Vec<TextAnnotation>,
    strokes: Vec<Stroke>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text annotations in creation order.
    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    /// Strokes in creation order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Append a text annotation.
    pub fn add_text(&mut self, annotation: TextAnnotation) -> EntityId {
        let id = annotation.id();
        self.texts.push(annotation);
        id
    }

    /// Begin a new stroke at `start`.
    pub fn add_stroke(&mut self, start: Point) -> EntityId {
        let stroke = Stroke::new(start);
        let id = stroke.id();
        self.strokes.push(stroke);
        id
    }

    /// Extend the most recently added stroke.
    /// Returns false if there are no strokes.
    pub fn append_to_last_stroke(&mut self, point: Point) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Move a text annotation by a delta.
    pub fn translate_text(&mut self, id: EntityId, delta: Vec2) -> bool {
        match self.text_mut(id) {
            Some(text) => {
                text.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Move every point of a stroke by a delta.
    pub fn translate_stroke(&mut self, id: EntityId, delta: Vec2) -> bool {
        match self.stroke_mut(id) {
            Some(stroke) => {
                stroke.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Put a text annotation's anchor at an absolute position.
    pub fn set_text_position(&mut self, id: EntityId, position: Point) -> bool {
        match self.text_mut(id) {
            Some(text) => {
                text.position = position;
                true
            }
            None => false,
        }
    }

    /// Get a text annotation by ID.
    pub fn text(&self, id: EntityId) -> Option<&TextAnnotation> {
        self.texts.iter().find(|t| t.id() == id)
    }

    /// Get a mutable text annotation by ID.
    pub fn text_mut(&mut self, id: EntityId) -> Option<&mut TextAnnotation> {
        self.texts.iter_mut().find(|t| t.id() == id)
    }

    /// Get a stroke by ID.
    pub fn stroke(&self, id: EntityId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable stroke by ID.
    pub fn stroke_mut(&mut self, id: EntityId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    /// The stroke currently being extended, if any.
    pub fn last_stroke(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// Remove all content.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.strokes.clear();
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.strokes.is_empty()
    }

    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.texts.len() + self.strokes.len()
    }

    /// Serialize the scene to JSON for debug dumps.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
