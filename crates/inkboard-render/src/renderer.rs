//! Renderer trait abstraction.

use inkboard_core::scene::Scene;
use inkboard_core::style::{LineStyle, Rgba8Color, StyleControls};
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("failed to read font file: {0}")]
    FontIo(#[from] std::io::Error),
    #[error("invalid font data for family {0:?}")]
    InvalidFont(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single full redraw.
pub struct RenderContext<'a> {
    /// The scene to draw.
    pub scene: &'a Scene,
    /// Surface size in pixels.
    pub size: Size,
    /// Background fill. Transparent matches a freshly cleared surface.
    pub background: Color,
    /// Color applied to every stroke.
    pub stroke_color: Rgba8Color,
    /// Dash style applied to every stroke.
    pub line_style: LineStyle,
    /// Width of strokes and underlines.
    pub line_width: f64,
    /// Distance of underlines below the baseline.
    pub underline_offset: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with default styling.
    pub fn new(scene: &'a Scene, size: Size) -> Self {
        Self {
            scene,
            size,
            background: Color::from_rgba8(0, 0, 0, 0),
            stroke_color: Rgba8Color::black(),
            line_style: LineStyle::Solid,
            line_width: 2.0,
            underline_offset: 2.0,
        }
    }

    /// Take stroke color and line style from the current controls.
    pub fn with_controls(mut self, controls: &StyleControls) -> Self {
        self.stroke_color = controls.color;
        self.line_style = controls.line_style;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set line width and underline offset.
    pub fn with_metrics(mut self, line_width: f64, underline_offset: f64) -> Self {
        self.line_width = line_width;
        self.underline_offset = underline_offset;
        self
    }
}

/// Trait for rendering backends.
///
/// Every call redraws the whole scene from scratch: clear, strokes in
/// creation order, then text in creation order.
pub trait Renderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}
