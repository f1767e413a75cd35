//! Application configuration loaded from a JSON file.

use inkboard_core::config::{ConfigError, EditorConfig};
use inkboard_core::style::{FontSlant, FontWeight, Rgba8Color};
use inkboard_render::{FontBook, RenderResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One font face to load at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFile {
    pub family: String,
    pub path: PathBuf,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub slant: FontSlant,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    /// Surface fill under all content.
    pub background: Rgba8Color,
    /// Font faces; the first family listed is the fallback for unknown families.
    pub fonts: Vec<FontFile>,
    /// Directory that receives `canvas.png`.
    pub output_dir: PathBuf,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba8Color::transparent(),
            fonts: Vec::new(),
            output_dir: PathBuf::from("."),
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file. Relative font paths are resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&json)?;
        if let Some(base) = path.parent() {
            for font in &mut config.fonts {
                if font.path.is_relative() {
                    font.path = base.join(&font.path);
                }
            }
        }
        Ok(config)
    }

    /// Load every configured font face.
    pub fn load_fonts(&self) -> RenderResult<FontBook> {
        let mut book = FontBook::new();
        for font in &self.fonts {
            book.load_file(&font.family, font.weight, font.slant, &font.path)?;
        }
        Ok(book)
    }
}
