//! Error types for gzembed
//!
//! Library code returns [`GzembedError`]; the binary wraps it with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gzembed operations
pub type GzembedResult<T> = Result<T, GzembedError>;

/// Main error type for gzembed operations
#[derive(Error, Debug)]
pub enum GzembedError {
    /// Expected asset literal or listing block is absent from the input
    #[error("asset '{name}' not found in {path}")]
    NotFound { name: String, path: PathBuf },

    /// The same asset literal appears more than once
    #[error("asset '{name}' is defined {count} times in {path}, expected exactly one")]
    AmbiguousAsset {
        name: String,
        path: PathBuf,
        count: usize,
    },

    /// Declared data disagrees with the actual bytes
    #[error("format mismatch for '{name}': {message}")]
    FormatMismatch { name: String, message: String },

    /// Invalid configuration file or value
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Manifest could not be interpreted
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern construction error
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GzembedError {
    pub(crate) fn mismatch(name: &str, message: impl Into<String>) -> Self {
        GzembedError::FormatMismatch {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
