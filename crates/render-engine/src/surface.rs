//! The raster target every render draws into.

use image::{imageops, GrayImage, Rgba, RgbaImage};

use memegen_meme_model::Color;

/// Mutable RGBA raster, sized to the most recently loaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSurface {
    pixels: RgbaImage,
}

impl CanvasSurface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Whether the surface has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Resize to `width`×`height` and clear every pixel to transparent.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    /// Copy `image` to the origin, scaled to cover the whole surface.
    /// Pixels are replaced, not blended; callers [`reset`](Self::reset) first.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        if image.dimensions() == self.dimensions() {
            imageops::replace(&mut self.pixels, image, 0, 0);
        } else if !self.is_empty() {
            let scaled = imageops::resize(
                image,
                self.width(),
                self.height(),
                imageops::FilterType::Triangle,
            );
            imageops::replace(&mut self.pixels, &scaled, 0, 0);
        }
    }

    /// Paint `color` through a coverage mask whose top-left corner sits at
    /// `(left, top)`. Mask pixels falling outside the surface are discarded.
    pub fn blend_mask(&mut self, mask: &GrayImage, left: i32, top: i32, color: Color) {
        let (width, height) = (self.width() as i64, self.height() as i64);
        for (mx, my, coverage) in mask.enumerate_pixels() {
            if coverage[0] == 0 {
                continue;
            }
            let x = left as i64 + mx as i64;
            let y = top as i64 + my as i64;
            if x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
            *dst = source_over(*dst, color, coverage[0]);
        }
    }
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(500, 500)
    }
}

/// Porter-Duff source-over of `color` at `coverage` onto `dst`.
fn source_over(dst: Rgba<u8>, color: Color, coverage: u8) -> Rgba<u8> {
    let src_a = (color.a as f32 / 255.0) * (coverage as f32 / 255.0);
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let channel = |s: u8, d: u8| -> u8 {
        let value = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
