//! Nutrilens error types

use std::path::PathBuf;

/// Nutrilens error types
#[derive(Debug, thiserror::Error)]
pub enum NutrilensError {
    // Caller input errors
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("failed to decode image {path:?}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    // Configuration errors
    /// The loaded classifier was fit on a different descriptor width than
    /// the extractor produces.
    #[error("feature width mismatch: classifier expects {expected} features, extractor produces {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Configuration(String),

    // Model errors
    #[error("inference error: {0}")]
    Inference(String),

    // Serialization and I/O
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NutrilensError {
    /// Whether the error was caused by the image handed in by the caller.
    ///
    /// Input errors are reported inside a failed prediction envelope; every
    /// other error is a configuration or model fault and propagates.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidImage(_) | Self::ImageDecode { .. })
    }
}

/// Result type alias for Nutrilens operations
pub type Result<T> = std::result::Result<T, NutrilensError>;
