//! Font loading, face resolution and text measurement.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use inkboard_core::hit_test::{ApproximateMeasurer, TextMeasurer};
use inkboard_core::style::{FontSlant, FontSpec, FontWeight};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    weight: FontWeight,
    slant: FontSlant,
}

impl FaceKey {
    fn new(family: &str, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            family: family.to_lowercase(),
            weight,
            slant,
        }
    }
}

/// A face chosen for a [`FontSpec`], plus the styling that has to be
/// synthesized because no matching face was loaded.
#[derive(Debug, Clone)]
pub struct ResolvedFace<'a> {
    pub font: &'a FontArc,
    pub synthetic_bold: bool,
    pub synthetic_italic: bool,
}

impl ResolvedFace<'_> {
    /// Scale such that one em equals `size` pixels.
    pub fn scale(&self, size: f64) -> PxScale {
        let size = size as f32;
        match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(size * self.font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(size),
        }
    }

    /// Advance width of `text` including kerning.
    pub fn advance(&self, text: &str, size: f64) -> f64 {
        let scaled = self.font.as_scaled(self.scale(size));
        let mut width = 0.0f32;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width as f64
    }
}

/// Loaded fonts keyed by family, weight and slant.
///
/// Lookups fall back to the family's regular face (with synthetic
/// styling), then to the default family. Families with no faces at all are
/// measured with [`ApproximateMeasurer`].
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    faces: HashMap<FaceKey, FontArc>,
    default_family: Option<String>,
    fallback: ApproximateMeasurer,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face from raw font bytes. The first family added becomes
    /// the default.
    pub fn add_font(
        &mut self,
        family: &str,
        weight: FontWeight,
        slant: FontSlant,
        data: Vec<u8>,
    ) -> RenderResult<()> {
        let font =
            FontArc::try_from_vec(data).map_err(|_| RendererError::InvalidFont(family.to_string()))?;
        log::debug!("loaded font face {family} ({weight:?}, {slant:?})");
        self.faces.insert(FaceKey::new(family, weight, slant), font);
        if self.default_family.is_none() {
            self.default_family = Some(family.to_lowercase());
        }
        Ok(())
    }

    /// Register a face from a TTF/OTF file.
    pub fn load_file(
        &mut self,
        family: &str,
        weight: FontWeight,
        slant: FontSlant,
        path: &Path,
    ) -> RenderResult<()> {
        let data = std::fs::read(path)?;
        self.add_font(family, weight, slant, data)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether any face of `family` is loaded.
    pub fn has_family(&self, family: &str) -> bool {
        let family = family.to_lowercase();
        self.faces.keys().any(|key| key.family == family)
    }

    /// Pick the best loaded face for `spec`.
    pub fn resolve(&self, spec: &FontSpec) -> Option<ResolvedFace<'_>> {
        let family = spec.family.to_lowercase();
        self.resolve_in(&family, spec).or_else(|| {
            self.default_family
                .as_deref()
                .filter(|default| *default != family)
                .and_then(|default| self.resolve_in(default, spec))
        })
    }

    fn resolve_in(&self, family: &str, spec: &FontSpec) -> Option<ResolvedFace<'_>> {
        let candidates = [
            (spec.weight, spec.slant),
            (spec.weight, FontSlant::Normal),
            (FontWeight::Normal, spec.slant),
            (FontWeight::Normal, FontSlant::Normal),
        ];
        candidates.into_iter().find_map(|(weight, slant)| {
            self.faces
                .get(&FaceKey::new(family, weight, slant))
                .map(|font| ResolvedFace {
                    font,
                    synthetic_bold: spec.is_bold() && weight == FontWeight::Normal,
                    synthetic_italic: spec.is_italic() && slant == FontSlant::Normal,
                })
        })
    }
}

impl TextMeasurer for FontBook {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        match self.resolve(font) {
            Some(face) => face.advance(text, font.size),
            None => self.fallback.text_width(text, font),
        }
    }
}

/// DejaVu Sans, used by rendering tests.
#[cfg(test)]
pub(crate) const TEST_FONT: &[u8] = include_bytes!("../fixtures/DejaVuSans.ttf");
