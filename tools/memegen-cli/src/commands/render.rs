//! Caption a local image without touching the asset store.

use std::path::PathBuf;

use anyhow::Context;

use memegen_common::config::AppConfig;
use memegen_meme_model::{clamp_font_size, Overlays, TextStyle};
use memegen_render_engine::{CanvasSurface, Compositor};

use super::TextArgs;

pub fn run(
    config: &AppConfig,
    image: PathBuf,
    text: TextArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let decoded = image::open(&image)
        .with_context(|| format!("Failed to open image {}", image.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();

    let mut overlays = Overlays::for_canvas(width, height, config.render.edge_margin);
    overlays.top.text = text.top.clone();
    overlays.bottom.text = text.bottom.clone();
    if let Some(position) = text.top_pos {
        overlays.top.position = position;
    }
    if let Some(position) = text.bottom_pos {
        overlays.bottom.position = position;
    }
    let style = TextStyle::new(
        clamp_font_size(text.size.unwrap_or(config.render.font_size)),
        text.font.clone().unwrap_or_else(|| config.render.font_family.clone()),
        super::fill_color(config, text.color.as_deref())?,
    );

    let compositor = Compositor::new(super::font_book(config));
    let mut surface = CanvasSurface::new(width, height);
    compositor.compose(&mut surface, &decoded, &overlays, &style);

    let exporter = super::exporter(config, output);
    match exporter.export(&surface) {
        Some(path) => {
            println!("Wrote {} ({}x{})", path.display(), width, height);
            Ok(())
        }
        None => anyhow::bail!("Export to {} failed", exporter.target_path().display()),
    }
}
