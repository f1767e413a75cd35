//! CPU raster backend built on tiny-skia.

use crate::font::{FontBook, ResolvedFace};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use ab_glyph::{Font, ScaleFont, point};
use inkboard_core::hit_test::TextMeasurer;
use inkboard_core::shapes::{Stroke, TextAnnotation};
use inkboard_core::style::{LineStyle, Rgba8Color};
use std::collections::HashSet;
use tiny_skia::{LineCap, Mask, Paint, PathBuilder, Pixmap, Rect, StrokeDash, Transform};

/// Horizontal shear applied per pixel above the baseline for synthetic italics.
const ITALIC_SHEAR: f32 = 0.2;

/// Renders scenes into an RGBA pixmap.
pub struct RasterRenderer {
    pixmap: Pixmap,
    fonts: FontBook,
    /// Families already reported as missing.
    warned: HashSet<String>,
}

impl RasterRenderer {
    /// Create a renderer with a transparent `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            fonts: FontBook::new(),
            warned: HashSet::new(),
        })
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// The last rendered frame.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn ensure_size(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let width = ctx.size.width.round().max(0.0) as u32;
        let height = ctx.size.height.round().max(0.0) as u32;
        if width != self.pixmap.width() || height != self.pixmap.height() {
            log::debug!("resizing surface to {width}x{height}");
            self.pixmap = new_pixmap(width, height)?;
        }
        Ok(())
    }

    fn draw_stroke(&mut self, stroke: &Stroke, paint: &Paint, style: &tiny_skia::Stroke) {
        let mut points = stroke.points().iter();
        let Some(first) = points.next() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in points {
            pb.line_to(p.x as f32, p.y as f32);
        }
        // A lone move_to yields no path, so single-point strokes draw nothing.
        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, paint, style, Transform::identity(), None);
        }
    }

    fn draw_text(&mut self, text: &TextAnnotation, ctx: &RenderContext) {
        let paint = solid_paint(text.color);
        let family = text.font.family.to_lowercase();

        if !self.fonts.has_family(&family) && self.warned.insert(family.clone()) {
            log::warn!("no font loaded for family {:?}", text.font.family);
        }

        if let Some(face) = self.fonts.resolve(&text.font) {
            if let Some(mask) = glyph_mask(&face, text, self.pixmap.width(), self.pixmap.height()) {
                if let Some(rect) = full_rect(&self.pixmap) {
                    self.pixmap
                        .fill_rect(rect, &paint, Transform::identity(), Some(&mask));
                }
            }
        }

        if text.underlined {
            let width = self.fonts.text_width(&text.text, &text.font);
            let y = (text.position.y + ctx.underline_offset) as f32;
            let x = text.position.x as f32;
            let mut pb = PathBuilder::new();
            pb.move_to(x, y);
            pb.line_to(x + width as f32, y);
            if let Some(path) = pb.finish() {
                let style = tiny_skia::Stroke {
                    width: ctx.line_width as f32,
                    line_cap: LineCap::Butt,
                    ..Default::default()
                };
                self.pixmap
                    .stroke_path(&path, &paint, &style, Transform::identity(), None);
            }
        }
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.ensure_size(ctx)?;

        let bg = Rgba8Color::from(ctx.background);
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

        let paint = solid_paint(ctx.stroke_color);
        let style = stroke_style(ctx.line_width, ctx.line_style);
        for stroke in ctx.scene.strokes() {
            self.draw_stroke(stroke, &paint, &style);
        }
        for text in ctx.scene.texts() {
            self.draw_text(text, ctx);
        }
        Ok(())
    }
}

fn new_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RendererError::InvalidSize { width, height })
}

fn full_rect(pixmap: &Pixmap) -> Option<Rect> {
    Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32)
}

fn solid_paint(color: Rgba8Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn stroke_style(width: f64, line_style: LineStyle) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: width as f32,
        line_cap: LineCap::Butt,
        dash: StrokeDash::new(line_style.dash_pattern().to_vec(), 0.0),
        ..Default::default()
    }
}

/// Rasterize the glyphs of `text` into a coverage mask.
fn glyph_mask(face: &ResolvedFace<'_>, text: &TextAnnotation, width: u32, height: u32) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let scale = face.scale(text.font.size);
    let scaled = face.font.as_scaled(scale);
    let baseline = text.position.y as f32;
    let mut caret = text.position.x as f32;
    let mut previous = None;

    for ch in text.text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = face.font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let y = bounds.min.y as i32 + gy as i32;
            let mut x = bounds.min.x as i32 + gx as i32;
            if face.synthetic_italic {
                x += (ITALIC_SHEAR * (baseline - y as f32)).round() as i32;
            }
            plot(&mut mask, x, y, coverage);
            if face.synthetic_bold {
                plot(&mut mask, x + 1, y, coverage);
            }
        });
    }
    Some(mask)
}

fn plot(mask: &mut Mask, x: i32, y: i32, coverage: f32) {
    let (width, height) = (mask.width() as i32, mask.height() as i32);
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    let idx = (y * width + x) as usize;
    let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
    let data = mask.data_mut();
    data[idx] = data[idx].max(value);
}
