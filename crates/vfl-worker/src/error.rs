//! Error types for the worker engine.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur in the worker engine.
///
/// Fetch handling never produces one: every fetch path terminates in a valid
/// response. These surface only from lifecycle operations and configuration.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cache error during lifecycle maintenance.
    #[error("cache error: {0}")]
    Cache(#[from] vfl_cache::CacheError),
}
