//! Text annotation.

use super::EntityId;
use crate::style::{FontSpec, Rgba8Color, StyleControls};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A positioned, styled piece of text.
///
/// `position` is the baseline-left anchor in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub(crate) id: EntityId,
    /// The text content.
    pub text: String,
    /// Baseline-left anchor.
    pub position: Point,
    /// Font captured at creation.
    pub font: FontSpec,
    /// Fill color captured at creation.
    pub color: Rgba8Color,
    /// Draw an underline below the baseline.
    pub underlined: bool,
}

impl TextAnnotation {
    /// Create a text annotation with default font and color.
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            position,
            font: FontSpec::default(),
            color: Rgba8Color::black(),
            underlined: false,
        }
    }

    /// Create a text annotation styled from the current controls.
    pub fn from_controls(position: Point, text: impl Into<String>, controls: &StyleControls) -> Self {
        Self {
            font: controls.font_spec(),
            color: controls.color,
            underlined: controls.underline,
            ..Self::new(position, text)
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_color(mut self, color: Rgba8Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_underline(mut self, underlined: bool) -> Self {
        self.underlined = underlined;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_bold(&self) -> bool {
        self.font.is_bold()
    }

    pub fn is_italic(&self) -> bool {
        self.font.is_italic()
    }

    /// Move the anchor by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
