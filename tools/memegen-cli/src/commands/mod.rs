//! Subcommand implementations and the helpers they share.

pub mod config;
pub mod fonts;
pub mod make;
pub mod render;
pub mod session;
pub mod sign;
pub mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use memegen_asset_store::PinataClient;
use memegen_common::config::AppConfig;
use memegen_meme_model::{Color, Position};
use memegen_render_engine::{Compositor, Exporter, FontBook, HttpImageSource};
use memegen_session::{Event, MemeSession, SessionDriver, SessionSettings};

/// Text options shared by `render` and `make`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TextArgs {
    /// Top line of text
    #[arg(long, default_value = "")]
    pub top: String,

    /// Bottom line of text
    #[arg(long, default_value = "")]
    pub bottom: String,

    /// Font size in pixels; values outside 10-100 are clamped to that range
    #[arg(long)]
    pub size: Option<u32>,

    /// Font family, e.g. "Impact"
    #[arg(long)]
    pub font: Option<String>,

    /// Fill colour as #rrggbb
    #[arg(long)]
    pub color: Option<String>,

    /// Anchor of the top line as X,Y (defaults to centred near the top)
    #[arg(long, value_parser = parse_position)]
    pub top_pos: Option<Position>,

    /// Anchor of the bottom line as X,Y (defaults to centred near the bottom)
    #[arg(long, value_parser = parse_position)]
    pub bottom_pos: Option<Position>,
}

impl TextArgs {
    /// The edits these options describe, as session events.
    pub fn events(&self) -> Vec<Event> {
        use memegen_meme_model::OverlaySlot::{Bottom, Top};

        let mut events = vec![
            Event::SetText(Top, self.top.clone()),
            Event::SetText(Bottom, self.bottom.clone()),
        ];
        if let Some(size) = self.size {
            events.push(Event::SetFontSize(size));
        }
        if let Some(font) = &self.font {
            events.push(Event::SetFontFamily(font.clone()));
        }
        if let Some(color) = &self.color {
            events.push(Event::SetFillColor(color.clone()));
        }
        if let Some(position) = self.top_pos {
            events.push(Event::SetPosition(Top, position));
        }
        if let Some(position) = self.bottom_pos {
            events.push(Event::SetPosition(Bottom, position));
        }
        events
    }
}

/// Parse `X,Y` into a canvas position. Either coordinate may be negative.
pub fn parse_position(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid x '{x}': {e}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid y '{y}': {e}"))?;
    Ok(Position::new(x, y))
}

/// Load configuration from `path` or the standard location, then apply
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path);
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load(),
    }
}

/// Font lookup as configured.
pub fn font_book(config: &AppConfig) -> FontBook {
    FontBook::system(config.render.fallback_font.clone())
}

/// Exporter writing into `output`, or the configured directory.
pub fn exporter(config: &AppConfig, output: Option<PathBuf>) -> Exporter {
    let mut export = config.export.clone();
    if let Some(dir) = output {
        export.output_dir = dir;
    }
    Exporter::from_config(&export)
}

/// A session driver wired to the real asset store and gateway.
pub fn remote_driver(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<SessionDriver> {
    config.validate_remote()?;
    let store = PinataClient::from_config(&config.asset_store)?;
    let images = HttpImageSource::new(Duration::from_secs(config.asset_store.request_timeout_secs))?;
    let state = MemeSession::from_defaults(&config.render)?;
    Ok(SessionDriver::new(
        state,
        Arc::new(store),
        Arc::new(images),
        Arc::new(Compositor::new(font_book(config))),
        exporter(config, output),
        SessionSettings::from_config(&config.asset_store),
    ))
}

/// Parse a fill colour option, keeping the configured default when absent.
pub fn fill_color(config: &AppConfig, color: Option<&str>) -> anyhow::Result<Color> {
    let raw = color.unwrap_or(&config.render.fill_color);
    Ok(Color::parse_hex(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("250,40").unwrap(), Position::new(250, 40));
        assert_eq!(parse_position(" -5 , 7 ").unwrap(), Position::new(-5, 7));
        assert!(parse_position("250").is_err());
        assert!(parse_position("a,b").is_err());
    }

    #[test]
    fn test_text_args_events_only_include_given_options() {
        let args = TextArgs {
            top: "TOP".into(),
            size: Some(48),
            ..TextArgs::default()
        };
        let events = args.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2], Event::SetFontSize(48)));
    }
}
