//! In-memory asset store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::{ContentIdentifier, SelectedAsset, SignedUrl};

use crate::AssetStore;

/// Asset store that keeps uploads in memory and mints fake signed URLs.
///
/// Every call is counted, uploads can be slowed down, and uploads or
/// signing can be switched to fail to exercise error paths.
#[derive(Debug)]
pub struct MockAssetStore {
    gateway: String,
    fixed_cid: Option<String>,
    files: Mutex<HashMap<ContentIdentifier, SelectedAsset>>,
    signed_for: Mutex<Vec<ContentIdentifier>>,
    upload_calls: AtomicUsize,
    sign_calls: AtomicUsize,
    fail_uploads: AtomicBool,
    fail_signing: AtomicBool,
    upload_delay: Mutex<Option<Duration>>,
}

impl MockAssetStore {
    pub fn new() -> Self {
        Self {
            gateway: "gw.mock".to_string(),
            fixed_cid: None,
            files: Mutex::new(HashMap::new()),
            signed_for: Mutex::new(Vec::new()),
            upload_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            fail_uploads: AtomicBool::new(false),
            fail_signing: AtomicBool::new(false),
            upload_delay: Mutex::new(None),
        }
    }

    /// Return `cid` for every upload instead of a generated one.
    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.fixed_cid = Some(cid.into());
        self
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    /// Make later uploads wait `delay` before answering.
    pub fn set_upload_delay(&self, delay: Option<Duration>) {
        if let Ok(mut slot) = self.upload_delay.lock() {
            *slot = delay;
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// Identifiers signed so far, in call order.
    pub fn signed_for(&self) -> Vec<ContentIdentifier> {
        self.signed_for
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Bytes stored under `cid`, if any.
    pub fn stored(&self, cid: &ContentIdentifier) -> Option<Vec<u8>> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(cid).map(|a| a.bytes.clone()))
    }
}

impl Default for MockAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssetStore for MockAssetStore {
    async fn upload(&self, asset: &SelectedAsset) -> MemeResult<ContentIdentifier> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.upload_delay.lock().ok().and_then(|d| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(MemeError::upload("mock upload failure"));
        }
        let cid = match &self.fixed_cid {
            Some(cid) => ContentIdentifier::new(cid.clone())?,
            None => ContentIdentifier::new(format!("mockcid{n:04}"))?,
        };
        if let Ok(mut files) = self.files.lock() {
            files.insert(cid.clone(), asset.clone());
        }
        Ok(cid)
    }

    async fn create_signed_url(
        &self,
        cid: &ContentIdentifier,
        expires_in_secs: u64,
    ) -> MemeResult<SignedUrl> {
        let n = self.sign_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut signed) = self.signed_for.lock() {
            signed.push(cid.clone());
        }
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(MemeError::signed_url("mock signing failure"));
        }
        let url = format!(
            "https://{}/files/{cid}?X-Expires={expires_in_secs}&sig=mock{n}",
            self.gateway
        );
        Ok(SignedUrl::new(url, Utc::now(), expires_in_secs))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
