//! Selected files, content identifiers, and signed URLs.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use memegen_common::error::{MemeError, MemeResult};

/// Media type reported when neither the extension nor the bytes identify the file.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// A file the user picked, held until the upload starts.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedAsset {
    /// File name without directories.
    pub file_name: String,

    /// Declared media type, e.g. `image/png`.
    pub media_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,

    /// Natural pixel size when the bytes could be probed locally.
    pub dimensions: Option<(u32, u32)>,
}

impl SelectedAsset {
    /// Build an asset from in-memory bytes. Only `image/*` media types are accepted.
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> MemeResult<Self> {
        let file_name = file_name.into();
        let media_type = media_type.into();
        if !is_image_media_type(&media_type) {
            return Err(MemeError::validation(format!(
                "{file_name} is not an image ({media_type})"
            )));
        }
        let dimensions = probe_dimensions(&bytes);
        Ok(Self {
            file_name,
            media_type,
            bytes,
            dimensions,
        })
    }

    /// Read an asset from disk, deriving the media type from the extension
    /// and falling back to sniffing the contents.
    pub fn from_path(path: &Path) -> MemeResult<Self> {
        if !path.exists() {
            return Err(MemeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = media_type_for(path, &bytes);
        Self::new(file_name, media_type, bytes)
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedAsset")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Whether a media type names an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Media type for a file, by extension first and then by content.
pub fn media_type_for(path: &Path, bytes: &[u8]) -> String {
    image::ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(bytes))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Opaque handle the asset store returns for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentIdentifier(String);

impl ContentIdentifier {
    /// Wrap a raw identifier. Blank identifiers are rejected.
    pub fn new(raw: impl Into<String>) -> MemeResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemeError::validation("content identifier is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest lifetime honoured when computing expiry instants (ten years).
const MAX_EXPIRY_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// A time-limited URL granting read access to a stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedUrl {
    /// The URL itself.
    pub url: String,

    /// When the store minted it.
    pub issued_at: DateTime<Utc>,

    /// Lifetime requested from the store.
    pub expires_in_secs: u64,
}

impl SignedUrl {
    pub fn new(url: impl Into<String>, issued_at: DateTime<Utc>, expires_in_secs: u64) -> Self {
        Self {
            url: url.into(),
            issued_at,
            expires_in_secs,
        }
    }

    /// Instant after which the URL no longer resolves.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = self.expires_in_secs.min(MAX_EXPIRY_SECS) as i64;
        self.issued_at + Duration::seconds(secs)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
