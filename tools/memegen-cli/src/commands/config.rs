//! Show the effective configuration.

use std::path::Path;

use memegen_common::config::{config_file_path, AppConfig, ENV_PINATA_JWT};

pub fn run(config: &AppConfig, explicit_path: Option<&Path>) -> anyhow::Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);
    let note = if path.exists() {
        ""
    } else {
        " (not found, using defaults)"
    };
    println!("Config file: {}{note}", path.display());

    let credential = if config.asset_store.jwt.is_some() {
        "set"
    } else {
        "not set"
    };
    println!("Credential ({ENV_PINATA_JWT}): {credential}");
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);

    if let Err(e) = config.validate() {
        println!();
        println!("[WARN] {e}");
    }
    Ok(())
}
