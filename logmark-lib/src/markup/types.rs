//! Type definitions for the markup module.

use thiserror::Error;

/// Errors that can occur when working with log-entry markup.
#[derive(Error, Debug)]
pub enum MarkupError {
    /// Failed to load a markup file.
    #[error("Failed to load file: {0}")]
    FileLoad(#[from] std::io::Error),

    /// Failed to parse a service JSON payload.
    #[error("Failed to parse service payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for markup operations.
pub type MarkupResult<T> = Result<T, MarkupError>;
