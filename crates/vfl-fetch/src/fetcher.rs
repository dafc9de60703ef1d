//! The fetch trait.

use async_trait::async_trait;
use vfl_core::{Request, Response};

use crate::error::FetchError;

/// Performs live network fetches.
///
/// A non-2xx response resolves to `Ok`; [`FetchError`] covers transport
/// failures only. The caching strategies rely on this split: an HTTP 404 is
/// a response to pass through (or cache), while a connection failure
/// triggers the offline fallback path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a live network fetch for the request.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}
