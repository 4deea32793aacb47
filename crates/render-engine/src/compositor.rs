//! Image + text compositing.
//!
//! Every render redraws the whole surface: resize to the image, clear,
//! draw the image, then fill and stroke each overlay in order.

use std::sync::Arc;

use image::RgbaImage;

use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::{Overlays, SignedUrl, TextOverlay, TextStyle};

use crate::fonts::FontBook;
use crate::source::ImageSource;
use crate::surface::CanvasSurface;
use crate::text::{stroke_mask, GlyphRasterizer};

/// Draws images and text overlays onto canvas surfaces. Clones share the
/// font cache.
#[derive(Clone)]
pub struct Compositor {
    fonts: Arc<FontBook>,
}

impl Compositor {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts: Arc::new(fonts),
        }
    }

    /// Load the image at `url` and composite it into a fresh surface.
    pub async fn render(
        &self,
        source: &dyn ImageSource,
        url: &SignedUrl,
        overlays: &Overlays,
        style: &TextStyle,
    ) -> MemeResult<CanvasSurface> {
        tracing::debug!(loader = source.name(), "Loading image for render");
        let image = source.fetch(url).await?;

        // Font lookup and morphology are CPU-bound and may block on fontconfig.
        let compositor = self.clone();
        let overlays = overlays.clone();
        let style = style.clone();
        tokio::task::spawn_blocking(move || {
            let image = image.to_rgba8();
            let mut surface = CanvasSurface::new(image.width(), image.height());
            compositor.compose(&mut surface, &image, &overlays, &style);
            surface
        })
        .await
        .map_err(|e| MemeError::image_load(format!("Compositing task failed: {e}")))
    }

    /// Like [`Compositor::render`], drawing into an existing surface. When
    /// the image fails to load the surface is left exactly as it was.
    pub async fn render_into(
        &self,
        source: &dyn ImageSource,
        url: &SignedUrl,
        overlays: &Overlays,
        style: &TextStyle,
        surface: &mut CanvasSurface,
    ) -> MemeResult<()> {
        *surface = self.render(source, url, overlays, style).await?;
        Ok(())
    }

    /// Redraw `surface` from `image` and the overlays.
    pub fn compose(
        &self,
        surface: &mut CanvasSurface,
        image: &RgbaImage,
        overlays: &Overlays,
        style: &TextStyle,
    ) {
        surface.reset(image.width(), image.height());
        surface.draw_image(image);

        let rasterizer = self.fonts.resolve(&style.font_family);
        tracing::trace!(
            font = %style.font_shorthand(),
            resolved = rasterizer.name(),
            fill = %style.fill,
            "Drawing overlays"
        );
        for overlay in overlays.iter() {
            draw_overlay(surface, rasterizer.as_ref(), overlay, style);
        }
    }
}

/// Fill then stroke one centred line of text.
fn draw_overlay(
    surface: &mut CanvasSurface,
    rasterizer: &dyn GlyphRasterizer,
    overlay: &TextOverlay,
    style: &TextStyle,
) {
    if overlay.is_blank() {
        return;
    }
    let Some(mask) = rasterizer.rasterize(&overlay.text, style.font_size as f32) else {
        return;
    };

    let pen_x = overlay.position.x.saturating_sub((mask.advance / 2.0).round() as i32);
    let left = pen_x.saturating_add(mask.left);
    let top = overlay.position.y.saturating_add(mask.top);
    surface.blend_mask(&mask.coverage, left, top, style.fill);

    let (ring, pad) = stroke_mask(&mask.coverage, style.stroke_width());
    let pad = pad as i32;
    surface.blend_mask(
        &ring,
        left.saturating_sub(pad),
        top.saturating_sub(pad),
        style.stroke(),
    );
}
