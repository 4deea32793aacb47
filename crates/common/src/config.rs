//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MemeError, MemeResult};

/// Environment variable holding the asset store JWT.
pub const ENV_PINATA_JWT: &str = "MEMEGEN_PINATA_JWT";
/// Environment variable holding the dedicated gateway host.
pub const ENV_GATEWAY_URL: &str = "MEMEGEN_GATEWAY_URL";
/// Environment variable overriding the export directory.
pub const ENV_EXPORT_DIR: &str = "MEMEGEN_EXPORT_DIR";
/// Environment variable pointing at a fallback font file.
pub const ENV_FONT_PATH: &str = "MEMEGEN_FONT_PATH";

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote asset store settings.
    #[serde(default)]
    pub asset_store: AssetStoreConfig,

    /// Default text styling and canvas settings.
    #[serde(default)]
    pub render: RenderDefaults,

    /// Where downloads are written.
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pinning/gateway service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetStoreConfig {
    /// Bearer credential. Only ever read from the environment.
    #[serde(skip)]
    pub jwt: Option<String>,

    /// Dedicated gateway host, e.g. `example.mypinata.cloud`.
    pub gateway: String,

    /// Base URL of the management API.
    pub api_url: String,

    /// Base URL of the upload API.
    pub uploads_url: String,

    /// Lifetime requested for every signed URL.
    pub signed_url_expiry_secs: u64,

    /// How often the current signed URL is renewed.
    pub refresh_interval_secs: u64,

    /// Per-request timeout.
    pub request_timeout_secs: u64,
}

/// Text and canvas defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    pub font_size: u32,
    pub font_family: String,
    pub fill_color: String,

    /// Canvas size before any image is loaded.
    pub canvas_width: u32,
    pub canvas_height: u32,

    /// Distance of the top/bottom baselines from the image edges.
    pub edge_margin: i32,

    /// Font file used when a family cannot be found on the system.
    #[serde(default)]
    pub fallback_font: Option<PathBuf>,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the PNG is written into.
    pub output_dir: PathBuf,

    /// File name of the download.
    pub file_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "memegen=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AssetStoreConfig {
    fn default() -> Self {
        Self {
            jwt: None,
            gateway: String::new(),
            api_url: "https://api.pinata.cloud".to_string(),
            uploads_url: "https://uploads.pinata.cloud".to_string(),
            signed_url_expiry_secs: 300,
            refresh_interval_secs: 240,
            request_timeout_secs: 60,
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            font_size: 30,
            font_family: "Impact".to_string(),
            fill_color: "#ffffff".to_string(),
            canvas_width: 500,
            canvas_height: 500,
            edge_margin: 40,
            fallback_font: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: "meme_with_text.png".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults,
    /// then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(&config_file_path());
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(jwt) = lookup(ENV_PINATA_JWT).filter(|v| !v.trim().is_empty()) {
            self.asset_store.jwt = Some(jwt.trim().to_string());
        }
        if let Some(gateway) = lookup(ENV_GATEWAY_URL).filter(|v| !v.trim().is_empty()) {
            self.asset_store.gateway = gateway.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|v| !v.trim().is_empty()) {
            self.export.output_dir = PathBuf::from(dir);
        }
        if let Some(font) = lookup(ENV_FONT_PATH).filter(|v| !v.trim().is_empty()) {
            self.render.fallback_font = Some(PathBuf::from(font));
        }
    }

    /// Check the timing invariants that every session relies on.
    pub fn validate(&self) -> MemeResult<()> {
        let store = &self.asset_store;
        if store.signed_url_expiry_secs == 0 {
            return Err(MemeError::config("signed_url_expiry_secs must be positive"));
        }
        if store.refresh_interval_secs == 0
            || store.refresh_interval_secs >= store.signed_url_expiry_secs
        {
            return Err(MemeError::config(format!(
                "refresh_interval_secs ({}) must be positive and shorter than signed_url_expiry_secs ({})",
                store.refresh_interval_secs, store.signed_url_expiry_secs
            )));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(MemeError::config("export.file_name must not be empty"));
        }
        Ok(())
    }

    /// Like [`AppConfig::validate`], and additionally require remote credentials.
    pub fn validate_remote(&self) -> MemeResult<()> {
        self.validate()?;
        if self.asset_store.jwt.is_none() {
            return Err(MemeError::config(format!(
                "no asset store credential; set {ENV_PINATA_JWT}"
            )));
        }
        if self.asset_store.gateway.trim().is_empty() {
            return Err(MemeError::config(format!(
                "no gateway configured; set {ENV_GATEWAY_URL}"
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("memegen").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_signed_url_policy() {
        let config = AppConfig::default();
        assert_eq!(config.asset_store.signed_url_expiry_secs, 300);
        assert_eq!(config.asset_store.refresh_interval_secs, 240);
        assert_eq!(config.export.file_name, "meme_with_text.png");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_refresh_must_be_shorter_than_expiry() {
        let mut config = AppConfig::default();
        config.asset_store.refresh_interval_secs = 300;
        assert!(matches!(config.validate(), Err(MemeError::Config { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            ENV_PINATA_JWT => Some(" token ".to_string()),
            ENV_GATEWAY_URL => Some("gw.example".to_string()),
            ENV_EXPORT_DIR => Some("/tmp/out".to_string()),
            _ => None,
        });
        assert_eq!(config.asset_store.jwt.as_deref(), Some("token"));
        assert_eq!(config.asset_store.gateway, "gw.example");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.render.fallback_font.is_none());
        assert!(config.validate_remote().is_ok());
    }

    #[test]
    fn test_remote_requires_credentials() {
        let config = AppConfig::default();
        assert!(config.validate_remote().is_err());
    }

    #[test]
    fn test_stroke_width_is_not_a_setting() {
        let json = serde_json::to_value(RenderDefaults::default()).unwrap();
        assert!(json.get("stroke_width").is_none());

        let parsed: AppConfig =
            serde_json::from_str(r#"{"render": {"font_size": 48, "stroke_width": 9}}"#).unwrap();
        assert_eq!(parsed.render.font_size, 48);
        assert_eq!(parsed.render.font_family, "Impact");
    }

    #[test]
    fn test_jwt_is_never_serialized() {
        let mut config = AppConfig::default();
        config.asset_store.jwt = Some("secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.asset_store.jwt.is_none());
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"logging": {"level": "debug", "json": true}}"#).unwrap();
        assert_eq!(parsed.logging.level, "debug");
        assert_eq!(parsed.render.font_size, 30);
    }

    #[test]
    fn test_load_from_missing_path_falls_back() {
        let config = AppConfig::load_from(Path::new("/nonexistent/memegen/config.json"));
        assert_eq!(config.render.font_family, "Impact");
    }
}
