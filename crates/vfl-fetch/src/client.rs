//! Live HTTP fetcher.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;
use vfl_core::{Request, Response, ResponseKind};

use crate::error::FetchError;
use crate::fetcher::Fetcher;

/// Live fetcher over a shared `reqwest` client.
///
/// Classifies the response kind by origin: `Basic` when the final response
/// origin (after redirects) equals the request origin, `Cors` otherwise.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher over a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let resp = builder.send().await.map_err(map_transport_error)?;

        let status = resp.status().as_u16();
        let kind = if resp.url().origin() == request.url.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        };

        let mut headers = HashMap::new();
        for (name, value) in resp.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?
            .to_vec();

        debug!(url = %request.url, status, "live fetch completed");
        Ok(Response::new(status, headers, body, kind))
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if err.is_builder() || err.is_request() {
        FetchError::InvalidRequest(err.to_string())
    } else {
        FetchError::Connection(err.to_string())
    }
}
