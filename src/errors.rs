use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for PaperMix
#[derive(Error, Debug)]
pub enum PaperMixError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {path}: {source}")]
    ConfigLoad {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Malformed image: {width}x{height} has no pixels")]
    MalformedImage { width: u32, height: u32 },

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Batch size mismatch: expected exactly {expected} images, got {actual}")]
    BatchSizeMismatch { expected: usize, actual: usize },

    #[error("Cannot aggregate an empty batch")]
    EmptyBatch,

    #[error("Capture gate rejected the batch: {0}")]
    CaptureGate(String),

    #[error("CSV output error: {0}")]
    CsvOutput(#[from] csv::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, PaperMixError>;
