//! Tool modes and the interaction state machine.

use crate::shapes::{EntityId, EntityRef};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Click to place text.
    #[default]
    Text,
    /// Freehand drawing.
    Brush,
    /// Pick up and drag existing content.
    Select,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Text => "text",
            ToolKind::Brush => "brush",
            ToolKind::Select => "select",
        }
    }

    /// Cursor the host surface should show for this tool.
    pub fn cursor(self) -> CursorIcon {
        match self {
            ToolKind::Text => CursorIcon::Text,
            ToolKind::Brush => CursorIcon::Crosshair,
            ToolKind::Select => CursorIcon::Default,
        }
    }
}

/// Cursor hints for the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Default,
    Text,
    Crosshair,
    Move,
}

/// Coarse interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
    Dragging,
}

/// What is being dragged. Only one entity can be held at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// A text annotation, with the pointer-minus-anchor offset captured at grab.
    Text { id: EntityId, offset: Vec2 },
    /// A stroke; each move re-derives the delta from the stroke's first point.
    Stroke { id: EntityId },
}

impl DragTarget {
    pub fn entity(&self) -> EntityRef {
        match *self {
            DragTarget::Text { id, .. } => EntityRef::Text(id),
            DragTarget::Stroke { id } => EntityRef::Stroke(id),
        }
    }
}

/// Current interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// A brush stroke is being extended.
    Drawing { stroke: EntityId },
    /// An entity is held by the pointer.
    Dragging(DragTarget),
}

impl Interaction {
    pub fn phase(&self) -> Phase {
        match self {
            Interaction::Idle => Phase::Idle,
            Interaction::Drawing { .. } => Phase::Drawing,
            Interaction::Dragging(_) => Phase::Dragging,
        }
    }

    /// The entity being dragged, if any.
    pub fn selection(&self) -> Option<EntityRef> {
        match self {
            Interaction::Dragging(target) => Some(target.entity()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_tool_is_text() {
        assert_eq!(ToolKind::default(), ToolKind::Text);
        assert_eq!(ToolKind::Brush.cursor(), CursorIcon::Crosshair);
    }

    #[test]
    fn test_phase_and_selection() {
        let id = Uuid::new_v4();
        assert_eq!(Interaction::Idle.phase(), Phase::Idle);
        assert_eq!(Interaction::Drawing { stroke: id }.phase(), Phase::Drawing);
        assert!(Interaction::Drawing { stroke: id }.selection().is_none());

        let dragging = Interaction::Dragging(DragTarget::Stroke { id });
        assert_eq!(dragging.phase(), Phase::Dragging);
        assert_eq!(dragging.selection(), Some(EntityRef::Stroke(id)));
    }

    #[test]
    fn test_tool_serde_names() {
        let tool: ToolKind = serde_json::from_str("\"brush\"").unwrap();
        assert_eq!(tool, ToolKind::Brush);
        assert_eq!(serde_json::to_string(&ToolKind::Select).unwrap(), "\"select\"");
    }
}
