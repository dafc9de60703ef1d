//! Fetch error types.

use thiserror::Error;

/// Transport failures during a live fetch.
///
/// Deliberately carries no HTTP-status variant: a response with any status
/// is a successful fetch. Strategies fall back only on these.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not reach the remote host.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The request could not be constructed or sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read.
    #[error("body read error: {0}")]
    Body(String),
}
