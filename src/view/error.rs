//! Error type for the fallible edges of the crate
//!
//! Rendering is total: malformed or sparse token data degrades to neutral
//! classes instead of failing. Errors only arise when decoding input,
//! loading configuration, or serializing output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    /// The token JSON (or register JSON) could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Output format not found in the registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Error while serializing a render model
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
