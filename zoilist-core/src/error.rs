//! Error types for Zoilist

use thiserror::Error;

/// Result type alias for Zoilist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Zoilist operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure reported by the code hosting platform
    #[error("Source error: {0}")]
    Source(String),

    /// Failure reported by the messaging platform
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
