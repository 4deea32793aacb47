//! Error types shared across memegen crates.

use std::path::PathBuf;

/// Top-level error type for memegen operations.
#[derive(Debug, thiserror::Error)]
pub enum MemeError {
    /// A local precondition failed before any remote call was made.
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Upload error: {message}")]
    Upload { message: String },

    #[error("Signed URL error: {message}")]
    SignedUrl { message: String },

    #[error("Image load error: {message}")]
    ImageLoad { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MemeError.
pub type MemeResult<T> = Result<T, MemeError>;

impl MemeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload {
            message: msg.into(),
        }
    }

    pub fn signed_url(msg: impl Into<String>) -> Self {
        Self::SignedUrl {
            message: msg.into(),
        }
    }

    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error was raised locally without touching the asset store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
