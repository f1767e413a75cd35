//! Inkboard Render Library
//!
//! Rendering abstraction and a tiny-skia raster backend for Inkboard.

pub mod export;
pub mod font;
pub mod raster;
pub mod renderer;

pub use export::{EXPORT_FILE_NAME, ExportError, export_png, export_to_dir};
pub use font::{FontBook, ResolvedFace};
pub use raster::RasterRenderer;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
