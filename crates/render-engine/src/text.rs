//! Glyph layout and rasterization into coverage masks.
//!
//! Masks are laid out left-aligned with the pen starting at `x = 0` on an
//! alphabetic baseline at `y = 0`; the compositor shifts them by half the
//! advance to centre them on the overlay anchor.

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{imageops, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};

/// Coverage above which a pixel counts as inside the glyph for stroking.
const STROKE_THRESHOLD: u8 = 128;

/// A rendered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    /// Per-pixel coverage, 0 = outside, 255 = fully inside.
    pub coverage: GrayImage,
    /// Offset of the mask's left edge from the pen origin.
    pub left: i32,
    /// Offset of the mask's top edge from the baseline (negative above it).
    pub top: i32,
    /// Total horizontal advance of the line.
    pub advance: f32,
}

/// Something that can turn a string into a coverage mask.
pub trait GlyphRasterizer: Send + Sync {
    /// Human-readable name of the font behind this rasterizer.
    fn name(&self) -> &str;

    /// Rasterize `text` at an em size of `size_px`. Returns `None` when the
    /// text produces no visible pixels.
    fn rasterize(&self, text: &str, size_px: f32) -> Option<TextMask>;
}

/// Rasterizer backed by a real outline font.
pub struct OutlineRasterizer {
    font: FontArc,
    name: String,
}

impl OutlineRasterizer {
    pub fn new(font: FontArc, name: impl Into<String>) -> Self {
        Self {
            font,
            name: name.into(),
        }
    }

    /// Pixel scale for a CSS-style em size.
    fn px_scale(&self, size_px: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size_px * self.font.height_unscaled() / upem),
            _ => PxScale::from(size_px),
        }
    }

    /// Glyph ids and pen x positions, with kerning applied.
    fn layout(&self, text: &str, scale: PxScale) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(scale);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut cursor_x = 0.0f32;
        let mut last: Option<GlyphId> = None;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let id = self.font.glyph_id(ch);
            if let Some(prev) = last {
                cursor_x += scaled.kern(prev, id);
            }
            glyphs.push((id, cursor_x));
            cursor_x += scaled.h_advance(id);
            last = Some(id);
        }
        (glyphs, cursor_x)
    }
}

impl GlyphRasterizer for OutlineRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(&self, text: &str, size_px: f32) -> Option<TextMask> {
        if text.is_empty() || size_px <= 0.0 {
            return None;
        }
        let scale = self.px_scale(size_px);
        let (glyphs, advance) = self.layout(text, scale);

        let outlined: Vec<_> = glyphs
            .into_iter()
            .filter_map(|(id, x)| {
                self.font
                    .outline_glyph(id.with_scale_and_position(scale, point(x, 0.0)))
            })
            .collect();
        if outlined.is_empty() {
            return None;
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for glyph in &outlined {
            let b = glyph.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x);
            max_y = max_y.max(b.max.y);
        }
        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let width = (max_x.ceil() as i32 - left).max(1) as u32;
        let height = (max_y.ceil() as i32 - top).max(1) as u32;

        let mut coverage = GrayImage::new(width, height);
        for glyph in &outlined {
            let b = glyph.px_bounds();
            let gx = b.min.x as i32 - left;
            let gy = b.min.y as i32 - top;
            glyph.draw(|px, py, c| {
                let x = gx + px as i32;
                let y = gy + py as i32;
                if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                    return;
                }
                let value = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = coverage.get_pixel_mut(x as u32, y as u32);
                pixel[0] = pixel[0].max(value);
            });
        }

        Some(TextMask {
            coverage,
            left,
            top,
            advance,
        })
    }
}

/// Font-free rasterizer drawing one solid block per visible character.
///
/// Used when no outline font can be found so that rendering still succeeds,
/// and as a deterministic rasterizer for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRasterizer;

impl BlockRasterizer {
    fn cell_width(size_px: f32) -> u32 {
        ((size_px * 0.6).round() as u32).max(2)
    }

    fn cell_height(size_px: f32) -> u32 {
        ((size_px * 0.7).round() as u32).max(1)
    }
}

impl GlyphRasterizer for BlockRasterizer {
    fn name(&self) -> &str {
        "block glyphs"
    }

    fn rasterize(&self, text: &str, size_px: f32) -> Option<TextMask> {
        if size_px <= 0.0 {
            return None;
        }
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.iter().all(|c| c.is_whitespace()) {
            return None;
        }
        let cell = Self::cell_width(size_px);
        let height = Self::cell_height(size_px);
        let width = cell * chars.len() as u32;

        let mut coverage = GrayImage::new(width, height);
        for (i, ch) in chars.iter().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = i as u32 * cell + 1;
            let x1 = (i as u32 + 1) * cell - 1;
            for x in x0..x1 {
                for y in 0..height {
                    coverage.put_pixel(x, y, Luma([255]));
                }
            }
        }

        Some(TextMask {
            coverage,
            left: 0,
            top: -(height as i32),
            advance: width as f32,
        })
    }
}

/// Outline of a fill mask, `width` pixels wide and centred on its edge.
///
/// Returns the stroke mask and the padding added on every side, so the
/// stroke's top-left corner sits `pad` pixels up and left of the fill mask.
pub fn stroke_mask(fill: &GrayImage, width: u32) -> (GrayImage, u32) {
    let radius = (width / 2).max(1);
    let k = radius.min(u8::MAX as u32) as u8;
    let pad = radius;

    let mut binary = GrayImage::new(fill.width() + 2 * pad, fill.height() + 2 * pad);
    let thresholded = GrayImage::from_fn(fill.width(), fill.height(), |x, y| {
        if fill.get_pixel(x, y)[0] >= STROKE_THRESHOLD {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    imageops::replace(&mut binary, &thresholded, pad as i64, pad as i64);

    let outer = dilate(&binary, Norm::LInf, k);
    let inner = erode(&binary, Norm::LInf, k);
    let ring = GrayImage::from_fn(binary.width(), binary.height(), |x, y| {
        if outer.get_pixel(x, y)[0] > 0 && inner.get_pixel(x, y)[0] == 0 {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    (ring, pad)
}
