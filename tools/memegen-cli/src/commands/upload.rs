//! Upload an image and print its first signed URL.

use std::path::PathBuf;

use memegen_asset_store::{coordinator, PinataClient};
use memegen_common::config::AppConfig;
use memegen_meme_model::SelectedAsset;

pub async fn run(config: &AppConfig, file: PathBuf) -> anyhow::Result<()> {
    config.validate_remote()?;
    let store = PinataClient::from_config(&config.asset_store)?;
    let asset = SelectedAsset::from_path(&file)?;

    println!("Uploading {} ({} bytes, {})", asset.file_name, asset.len(), asset.media_type);
    let (cid, url) = coordinator::submit_and_sign(
        &store,
        Some(&asset),
        config.asset_store.signed_url_expiry_secs,
    )
    .await?;

    println!("CID:        {cid}");
    println!("Signed URL: {url}");
    println!("Expires:    {}", url.expires_at());
    Ok(())
}
