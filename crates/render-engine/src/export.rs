//! PNG export of the composited surface.

use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use memegen_common::config::ExportConfig;

use crate::surface::CanvasSurface;

/// File name every export is written under.
pub const DEFAULT_FILE_NAME: &str = "meme_with_text.png";

/// Encode the surface as PNG. Returns `None` for an empty surface or when
/// the encoder rejects the data.
pub fn encode_png(surface: &CanvasSurface) -> Option<Vec<u8>> {
    if surface.is_empty() {
        return None;
    }
    let (width, height) = surface.dimensions();
    let mut bytes = Vec::new();
    match PngEncoder::new(&mut bytes).write_image(
        surface.pixels().as_raw(),
        width,
        height,
        ExtendedColorType::Rgba8,
    ) {
        Ok(()) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, width, height, "PNG encoding failed");
            None
        }
    }
}

/// Writes the surface to a fixed file in the export directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    file_name: String,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.output_dir.clone(), config.file_name.clone())
    }

    /// Where [`Exporter::export`] writes.
    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Save the surface as PNG, replacing any previous export.
    ///
    /// Failures are logged and otherwise ignored: the caller gets `None`
    /// and the previous export, if any, is left in place.
    pub fn export(&self, surface: &CanvasSurface) -> Option<PathBuf> {
        let Some(bytes) = encode_png(surface) else {
            tracing::warn!("Nothing to export: surface is empty or could not be encoded");
            return None;
        };
        let target = self.target_path();
        match write_atomically(&target, &bytes) {
            Ok(()) => {
                tracing::info!(
                    path = %target.display(),
                    bytes = bytes.len(),
                    width = surface.width(),
                    height = surface.height(),
                    "Exported meme"
                );
                Some(target)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %target.display(), "Export failed");
                None
            }
        }
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(".", DEFAULT_FILE_NAME)
    }
}

/// Write to a sibling temp file, then rename over `target`.
fn write_atomically(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp_name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".partial");
    let tmp = target.with_file_name(tmp_name);

    if let Err(e) = std::fs::write(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, target) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("memegen_test_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn painted(width: u32, height: u32) -> CanvasSurface {
        let mut surface = CanvasSurface::new(width, height);
        surface.draw_image(&RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255])));
        surface
    }

    #[test]
    fn test_encode_png_keeps_dimensions() {
        let bytes = encode_png(&painted(500, 500)).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (500, 500));
        assert_eq!(decoded.to_rgba8().get_pixel(250, 250), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_encode_empty_surface() {
        assert!(encode_png(&CanvasSurface::new(0, 0)).is_none());
    }

    #[test]
    fn test_export_uses_fixed_file_name() {
        let dir = scratch_dir("export_name");
        let exporter = Exporter::new(&dir, DEFAULT_FILE_NAME);
        let path = exporter.export(&painted(4, 3)).unwrap();
        assert_eq!(path.file_name().unwrap(), "meme_with_text.png");
        assert!(!dir.join("meme_with_text.png.partial").exists());
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_of_empty_surface_is_a_no_op() {
        let dir = scratch_dir("export_empty");
        let exporter = Exporter::new(&dir, DEFAULT_FILE_NAME);
        assert!(exporter.export(&CanvasSurface::new(0, 0)).is_none());
        assert!(!exporter.target_path().exists());
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let dir = scratch_dir("export_replace");
        let exporter = Exporter::new(&dir, DEFAULT_FILE_NAME);
        exporter.export(&painted(2, 2)).unwrap();
        exporter.export(&painted(6, 5)).unwrap();
        let decoded = image::open(exporter.target_path()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 5));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
