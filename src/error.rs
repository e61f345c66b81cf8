//! Custom error types for researchnet.
//!
//! All library functions return `Result<T, NetworkError>` instead of using `unwrap()`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for researchnet operations.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The paper list to preprocess does not exist
    #[error("Input file not found: {0:?} (run `researchnet fetch` first)")]
    MissingInput(PathBuf),

    /// A precomputed artifact is missing from the data directory
    #[error("Artifact not found: {0:?} (run `researchnet preprocess` first)")]
    MissingArtifact(PathBuf),

    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limited by external API
    #[error("Rate limited, retry after {0}s")]
    RateLimited(u64),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status from API
        code: i32,
        /// Error message from API
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Lookup miss when serving an artifact
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias using `NetworkError`
pub type Result<T> = std::result::Result<T, NetworkError>;
