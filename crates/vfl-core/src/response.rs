//! Response values, live and synthesized.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Errors reading a response body.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// Body is not valid UTF-8.
    #[error("invalid UTF-8 body: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin network response.
    Basic,
    /// Cross-origin network response.
    Cors,
    /// Cross-origin response whose contents are not readable.
    Opaque,
    /// Fabricated locally by a strategy fallback.
    Synthetic,
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
    /// Where the response came from.
    pub kind: ResponseKind,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>, kind: ResponseKind) -> Self {
        Self {
            status,
            headers,
            body,
            kind,
        }
    }

    /// Synthesize a 200 JSON response from a serializable value.
    pub fn synthetic_json(value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status: 200,
            headers,
            body: value.to_string().into_bytes(),
            kind: ResponseKind::Synthetic,
        }
    }

    /// Synthesize a plain-text response with the given status.
    pub fn synthetic_text(status: u16, body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        Self {
            status,
            headers,
            body: body.as_bytes().to_vec(),
            kind: ResponseKind::Synthetic,
        }
    }

    /// Synthesize an empty-bodied response with the given status.
    pub fn synthetic_empty(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
            kind: ResponseKind::Synthetic,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, BodyError> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}
