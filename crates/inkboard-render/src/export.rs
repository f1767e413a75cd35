//! PNG export of rendered frames.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tiny_skia::Pixmap;

/// Name of the exported file.
pub const EXPORT_FILE_NAME: &str = "canvas.png";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Straight (non-premultiplied) RGBA8 bytes of the pixmap.
fn rgba_bytes(pixmap: &Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// Encode the pixmap as an 8-bit RGBA PNG.
pub fn export_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba_bytes(pixmap))?;
    }
    Ok(png_data)
}

/// Write the pixmap to `dir/canvas.png`, replacing any previous export.
pub fn export_to_dir(pixmap: &Pixmap, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = export_png(pixmap)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("exported {}x{} image to {}", pixmap.width(), pixmap.height(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn red_pixmap() -> Pixmap {
        let mut pixmap = Pixmap::new(4, 3).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        pixmap
    }

    #[test]
    fn test_png_signature_and_header() {
        let bytes = export_png(&red_pixmap()).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
        // IHDR width and height, big-endian.
        assert_eq!(&bytes[16..20], &4u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &3u32.to_be_bytes());
    }

    #[test]
    fn test_half_transparent_pixels_are_demultiplied() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 128));
        let rgba = rgba_bytes(&pixmap);
        assert_eq!(rgba[3], 128);
        assert!(rgba[0] >= 254);
    }

    #[test]
    fn test_export_to_dir_overwrites_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let first = export_to_dir(&red_pixmap(), dir.path()).unwrap();
        assert_eq!(first, dir.path().join("canvas.png"));

        let blank = Pixmap::new(2, 2).unwrap();
        let second = export_to_dir(&blank, dir.path()).unwrap();
        assert_eq!(first, second);

        let written = std::fs::read(&second).unwrap();
        assert_eq!(written, export_png(&blank).unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_to_dir(&red_pixmap(), &dir.path().join("nope"));
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
