//! Font family resolution.
//!
//! A family name resolves, in order, to: the matching system font, the
//! configured fallback font file, any sans-serif system font, and finally
//! the built-in [`BlockRasterizer`]. Results are cached per family.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ab_glyph::FontArc;

use crate::text::{BlockRasterizer, GlyphRasterizer, OutlineRasterizer};

/// Cache of resolved rasterizers keyed by family name.
pub struct FontBook {
    use_system: bool,
    fallback_path: Option<PathBuf>,
    cache: Mutex<HashMap<String, Arc<dyn GlyphRasterizer>>>,
}

impl FontBook {
    /// Resolve through system fonts, then `fallback_path`, then block glyphs.
    pub fn system(fallback_path: Option<PathBuf>) -> Self {
        Self {
            use_system: true,
            fallback_path,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Never consult the system; every family renders as block glyphs.
    pub fn block_only() -> Self {
        Self {
            use_system: false,
            fallback_path: None,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Rasterizer for `family`. Never fails.
    pub fn resolve(&self, family: &str) -> Arc<dyn GlyphRasterizer> {
        let key = family.trim().to_string();
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let resolved = self.load(&key);
        tracing::debug!(family = %key, font = resolved.name(), "Resolved font");
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, resolved.clone());
        }
        resolved
    }

    fn load(&self, family: &str) -> Arc<dyn GlyphRasterizer> {
        if self.use_system {
            if let Some((font, name)) = load_system_font(family, false) {
                return Arc::new(OutlineRasterizer::new(font, name));
            }
        }
        if let Some(path) = &self.fallback_path {
            match load_font_file(path) {
                Some(font) => {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    return Arc::new(OutlineRasterizer::new(font, name));
                }
                None => {
                    tracing::warn!(path = %path.display(), "Fallback font could not be loaded");
                }
            }
        }
        if self.use_system {
            if let Some((font, name)) = load_system_font(family, true) {
                tracing::info!(family, substitute = %name, "Font family not installed, substituting");
                return Arc::new(OutlineRasterizer::new(font, name));
            }
            tracing::warn!(family, "No outline font available, drawing block glyphs");
        }
        Arc::new(BlockRasterizer)
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::system(None)
    }
}

/// Load a system font by family name. With `allow_generic`, a generic
/// sans-serif font is accepted when the family itself is missing.
///
/// The platform font database is loaded lazily and may be absent entirely
/// (fontconfig missing on minimal Linux images); that is treated as "no
/// system fonts" rather than a failure.
fn load_system_font(family: &str, allow_generic: bool) -> Option<(FontArc, String)> {
    match std::panic::catch_unwind(|| query_system_font(family, allow_generic)) {
        Ok(found) => found,
        Err(_) => {
            tracing::warn!("System font database unavailable");
            None
        }
    }
}

fn query_system_font(family: &str, allow_generic: bool) -> Option<(FontArc, String)> {
    use font_kit::family_name::FamilyName;
    use font_kit::properties::Properties;
    use font_kit::source::SystemSource;

    let mut families = Vec::new();
    if !family.is_empty() {
        families.push(FamilyName::Title(family.to_string()));
    }
    if allow_generic {
        families.push(FamilyName::SansSerif);
    }
    if families.is_empty() {
        return None;
    }

    let source = SystemSource::new();
    let handle = source
        .select_best_match(&families, &Properties::new())
        .ok()?;
    let font = handle.load().ok()?;
    let name = font.family_name();
    if !allow_generic && !name.eq_ignore_ascii_case(family) {
        return None;
    }
    let data = font.copy_font_data()?;
    let bytes: Vec<u8> = (*data).clone();
    FontArc::try_from_vec(bytes).ok().map(|f| (f, name))
}

fn load_font_file(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_only_resolves_every_family() {
        let book = FontBook::block_only();
        assert_eq!(book.resolve("Impact").name(), "block glyphs");
        assert_eq!(book.resolve("").name(), "block glyphs");
    }

    #[test]
    fn test_resolution_is_cached() {
        let book = FontBook::block_only();
        let a = book.resolve("Arial");
        let b = book.resolve(" Arial ");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_system_resolution_never_fails() {
        let book = FontBook::system(Some(PathBuf::from("/nonexistent/font.ttf")));
        let rasterizer = book.resolve("Definitely Not A Real Font Family");
        assert!(!rasterizer.name().is_empty());
    }
}
