//! Where the image behind a signed URL comes from.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use image::{DynamicImage, RgbaImage};

use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::SignedUrl;

/// Message shown when the image behind a URL cannot be loaded.
pub const IMAGE_LOAD_FAILED: &str = "Failed to load the image. Please try a different file.";

/// Trait for image loaders.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch and decode the image at `url`.
    async fn fetch(&self, url: &SignedUrl) -> MemeResult<DynamicImage>;

    /// Loader name for logging.
    fn name(&self) -> &str;
}

/// Loads images over HTTP(S) from the gateway.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    http: reqwest::Client,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> MemeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MemeError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &SignedUrl) -> MemeResult<DynamicImage> {
        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| MemeError::image_load(format!("Request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(MemeError::image_load(format!("HTTP {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| MemeError::image_load(format!("Failed to read body: {e}")))?;
        decode(bytes.to_vec()).await
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Treats the URL as a local path (optionally `file://`-prefixed).
#[derive(Debug, Clone, Default)]
pub struct FileImageSource;

#[async_trait::async_trait]
impl ImageSource for FileImageSource {
    async fn fetch(&self, url: &SignedUrl) -> MemeResult<DynamicImage> {
        let raw = url.as_str();
        let path = PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw));
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| MemeError::image_load(format!("{}: {e}", path.display())))?;
        decode(bytes).await
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Serves one in-memory image for every URL, with a failure switch.
#[derive(Debug)]
pub struct MockImageSource {
    image: RgbaImage,
    fail: AtomicBool,
    fetches: AtomicUsize,
}

impl MockImageSource {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageSource for MockImageSource {
    async fn fetch(&self, url: &SignedUrl) -> MemeResult<DynamicImage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MemeError::image_load(format!("mock failure for {url}")));
        }
        Ok(DynamicImage::ImageRgba8(self.image.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Decode off the async executor.
async fn decode(bytes: Vec<u8>) -> MemeResult<DynamicImage> {
    tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| MemeError::image_load(format!("Decoder task failed: {e}")))?
        .map_err(|e| MemeError::image_load(format!("Not a decodable image: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_file_source_reports_missing_file() {
        let url = SignedUrl::new("file:///nonexistent/meme.png", Utc::now(), 300);
        let err = FileImageSource.fetch(&url).await.unwrap_err();
        assert!(matches!(err, MemeError::ImageLoad { .. }));
    }

    #[tokio::test]
    async fn test_decode_rejects_garbage() {
        assert!(decode(b"definitely not an image".to_vec()).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_source_switch() {
        let source = MockImageSource::new(RgbaImage::new(3, 2));
        let url = SignedUrl::new("https://gw/files/x", Utc::now(), 300);
        assert_eq!(source.fetch(&url).await.unwrap().width(), 3);
        source.set_fail(true);
        assert!(source.fetch(&url).await.is_err());
        assert_eq!(source.fetches(), 2);
    }
}
