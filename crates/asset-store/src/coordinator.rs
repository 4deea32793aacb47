//! Upload coordination and signed URL requests.
//!
//! Both operations validate locally before touching the store: a missing
//! file or a missing content identifier never produces a remote call.

use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::{ContentIdentifier, SelectedAsset, SignedUrl};

use crate::AssetStore;

/// Message shown when submitting without a file.
pub const NO_FILE_SELECTED: &str = "Please select a file to upload.";

/// Message shown when a URL is requested before anything was uploaded.
pub const NOTHING_UPLOADED: &str = "Nothing has been uploaded yet.";

/// Upload the selected asset and return its content identifier.
pub async fn submit(
    store: &dyn AssetStore,
    asset: Option<&SelectedAsset>,
) -> MemeResult<ContentIdentifier> {
    let asset = asset.ok_or_else(|| MemeError::validation(NO_FILE_SELECTED))?;

    tracing::info!(
        store = store.name(),
        file = %asset.file_name,
        bytes = asset.len(),
        "Submitting upload"
    );
    let cid = store.upload(asset).await.map_err(|e| {
        tracing::warn!(error = %e, "Upload failed");
        e
    })?;
    tracing::info!(%cid, "Upload complete");
    Ok(cid)
}

/// Ask the store for a fresh signed URL for `cid`.
pub async fn request_url(
    store: &dyn AssetStore,
    cid: Option<&ContentIdentifier>,
    expires_in_secs: u64,
) -> MemeResult<SignedUrl> {
    let cid = cid.ok_or_else(|| MemeError::validation(NOTHING_UPLOADED))?;

    let url = store
        .create_signed_url(cid, expires_in_secs)
        .await
        .map_err(|e| {
            tracing::warn!(%cid, error = %e, "Signed URL request failed");
            e
        })?;
    tracing::info!(%cid, expires_at = %url.expires_at(), "Signed URL issued");
    Ok(url)
}

/// Upload and immediately request the first signed URL.
pub async fn submit_and_sign(
    store: &dyn AssetStore,
    asset: Option<&SelectedAsset>,
    expires_in_secs: u64,
) -> MemeResult<(ContentIdentifier, SignedUrl)> {
    let cid = submit(store, asset).await?;
    let url = request_url(store, Some(&cid), expires_in_secs).await?;
    Ok((cid, url))
}
