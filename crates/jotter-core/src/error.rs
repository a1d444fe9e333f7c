//! Error types for jotter-core

use std::time::Duration;

use thiserror::Error;

/// Result type alias using jotter-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Store key outside the allowed alphabet
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Note or tag not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// An attachment could not be read
    #[error("Failed to read attachment '{file}': {reason}")]
    AttachmentRead { file: String, reason: String },

    /// An attachment read did not finish in time
    #[error("Reading attachment '{file}' timed out after {timeout:?}")]
    AttachmentTimeout { file: String, timeout: Duration },
}
