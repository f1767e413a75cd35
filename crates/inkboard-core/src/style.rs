//! Colors, fonts, line styles and the style controls new content is built from.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// RGBA8 color value. Serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    ///
    /// Returns `None` for anything else.
    pub fn parse_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Parse a hex color, falling back to black.
    pub fn from_hex_or_black(color: &str) -> Self {
        Self::parse_hex(color).unwrap_or_else(Self::black)
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba8Color {
    fn default() -> Self {
        Self::black()
    }
}

impl TryFrom<String> for Rgba8Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

impl From<Rgba8Color> for String {
    fn from(color: Rgba8Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for Rgba8Color {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba8Color> for Color {
    fn from(color: Rgba8Color) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Line style applied to every stroke at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

impl LineStyle {
    /// Dash pattern (on, off, ...) in canvas units. Empty means solid.
    pub fn dash_pattern(self) -> &'static [f32] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dotted => &[2.0, 2.0],
            LineStyle::Dashed => &[10.0, 5.0],
        }
    }

    /// Parse a control value; unknown values select solid.
    pub fn from_control(value: &str) -> Self {
        match value {
            "dotted" => LineStyle::Dotted,
            "dashed" => LineStyle::Dashed,
            _ => LineStyle::Solid,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Structured font description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Family name, e.g. "Arial".
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontSpec {
    pub const DEFAULT_FAMILY: &'static str = "Arial";
    pub const DEFAULT_SIZE: f64 = 16.0;

    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_slant(mut self, slant: FontSlant) -> Self {
        self.slant = slant;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.slant == FontSlant::Italic
    }

    /// CSS-style font descriptor, e.g. `"bold italic 16px Arial"`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.is_bold() {
            out.push_str("bold ");
        }
        if self.is_italic() {
            out.push_str("italic ");
        }
        out.push_str(&format!("{}px {}", self.size, self.family));
        out
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAMILY, Self::DEFAULT_SIZE)
    }
}

/// Current values of the style inputs.
///
/// Text annotations copy these at creation; strokes read the color and
/// line style at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleControls {
    pub font_family: String,
    pub font_size: f64,
    pub color: Rgba8Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub line_style: LineStyle,
}

impl Default for StyleControls {
    fn default() -> Self {
        Self {
            font_family: FontSpec::DEFAULT_FAMILY.to_string(),
            font_size: FontSpec::DEFAULT_SIZE,
            color: Rgba8Color::black(),
            bold: false,
            italic: false,
            underline: false,
            line_style: LineStyle::Solid,
        }
    }
}

impl StyleControls {
    /// Font spec for text created with the current controls.
    pub fn font_spec(&self) -> FontSpec {
        let weight = if self.bold { FontWeight::Bold } else { FontWeight::Normal };
        let slant = if self.italic { FontSlant::Italic } else { FontSlant::Normal };
        FontSpec::new(self.font_family.clone(), self.font_size)
            .with_weight(weight)
            .with_slant(slant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba8Color::parse_hex("#ff0000"), Some(Rgba8Color::new(255, 0, 0, 255)));
        assert_eq!(Rgba8Color::parse_hex("#0f0"), Some(Rgba8Color::new(0, 255, 0, 255)));
        assert_eq!(Rgba8Color::parse_hex("#00000080"), Some(Rgba8Color::new(0, 0, 0, 128)));
        assert_eq!(Rgba8Color::parse_hex("red"), None);
        assert_eq!(Rgba8Color::parse_hex("#12345"), None);
        assert_eq!(Rgba8Color::from_hex_or_black("nope"), Rgba8Color::black());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgba8Color::new(255, 0, 16, 255).to_hex(), "#ff0010");
        assert_eq!(Rgba8Color::new(0, 0, 0, 0).to_hex(), "#00000000");
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Rgba8Color::new(255, 128, 0, 255)).unwrap();
        assert_eq!(json, "\"#ff8000\"");
        let parsed: Rgba8Color = serde_json::from_str("\"#00ff0080\"").unwrap();
        assert_eq!(parsed, Rgba8Color::new(0, 255, 0, 128));
        assert!(serde_json::from_str::<Rgba8Color>("\"green\"").is_err());
    }

    #[test]
    fn test_dash_patterns() {
        assert!(LineStyle::Solid.dash_pattern().is_empty());
        assert_eq!(LineStyle::Dotted.dash_pattern(), &[2.0, 2.0]);
        assert_eq!(LineStyle::Dashed.dash_pattern(), &[10.0, 5.0]);
        assert_eq!(LineStyle::from_control("dashed"), LineStyle::Dashed);
        assert_eq!(LineStyle::from_control("wavy"), LineStyle::Solid);
    }

    #[test]
    fn test_css_descriptor() {
        let spec = FontSpec::new("Georgia", 24.0);
        assert_eq!(spec.css(), "24px Georgia");

        let spec = spec.with_weight(FontWeight::Bold).with_slant(FontSlant::Italic);
        assert_eq!(spec.css(), "bold italic 24px Georgia");
    }

    #[test]
    fn test_controls_font_spec() {
        let controls = StyleControls {
            font_family: "Courier".to_string(),
            font_size: 30.0,
            bold: true,
            ..Default::default()
        };
        let spec = controls.font_spec();
        assert_eq!(spec.family, "Courier");
        assert!(spec.is_bold());
        assert!(!spec.is_italic());
    }
}
