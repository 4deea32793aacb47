//! Mint a signed URL for an uploaded file.

use memegen_asset_store::{coordinator, PinataClient};
use memegen_common::config::AppConfig;
use memegen_meme_model::ContentIdentifier;

pub async fn run(config: &AppConfig, cid: String, expires: Option<u64>) -> anyhow::Result<()> {
    config.validate_remote()?;
    let store = PinataClient::from_config(&config.asset_store)?;
    let cid = ContentIdentifier::new(cid)?;
    let expires = expires.unwrap_or(config.asset_store.signed_url_expiry_secs);

    let url = coordinator::request_url(&store, Some(&cid), expires).await?;
    println!("{url}");
    tracing::info!(%cid, expires_at = %url.expires_at(), "Signed URL printed");
    Ok(())
}
