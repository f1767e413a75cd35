//! Scene entities: text annotations and freehand strokes.

mod stroke;
mod text;

pub use stroke::Stroke;
pub use text::TextAnnotation;

use uuid::Uuid;

/// Stable identifier for scene entities.
pub type EntityId = Uuid;

/// Reference to one entity in the scene, by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Text(EntityId),
    Stroke(EntityId),
}

impl EntityRef {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Text(id) | EntityRef::Stroke(id) => *id,
        }
    }
}
