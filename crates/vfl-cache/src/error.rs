//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("failed to open store: {0}")]
    Open(String),

    /// Failed to serialize a stored value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("store operation failed: {0}")]
    Storage(String),
}
