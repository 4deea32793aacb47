//! memegen asset store
//!
//! Everything that talks to the pinning/gateway service:
//!
//! ```text
//!  SelectedAsset ──► coordinator::submit ──► AssetStore::upload ──► ContentIdentifier
//!                                                                        │
//!  ContentIdentifier ──► coordinator::request_url ──► AssetStore::create_signed_url
//!                                                                        │
//!                                                                        ▼
//!                                                                    SignedUrl
//! ```
//!
//! [`PinataClient`] is the production backend; [`MockAssetStore`] is an
//! in-memory stand-in with call counters and failure switches.

pub mod coordinator;
pub mod mock;
pub mod pinata;

pub use coordinator::*;
pub use mock::MockAssetStore;
pub use pinata::PinataClient;

use memegen_common::error::MemeResult;
use memegen_meme_model::{ContentIdentifier, SelectedAsset, SignedUrl};

/// Abstract interface for a hosted pinning/gateway service.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Store the file and return its content identifier.
    async fn upload(&self, asset: &SelectedAsset) -> MemeResult<ContentIdentifier>;

    /// Mint a URL that grants read access to `cid` for `expires_in_secs`.
    async fn create_signed_url(
        &self,
        cid: &ContentIdentifier,
        expires_in_secs: u64,
    ) -> MemeResult<SignedUrl>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
