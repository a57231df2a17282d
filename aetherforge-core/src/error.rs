//! Error types for aetherforge-core

use thiserror::Error;

/// Main error type for the aetherforge-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing credentials, bad config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// Oracle backend failure (transport, status, malformed response)
    #[error("service error: {0}")]
    Service(String),
}

/// Result type alias for aetherforge-core
pub type Result<T> = std::result::Result<T, Error>;
