//! Stored response snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vfl_core::{Response, ResponseKind};

/// An immutable snapshot of a prior successful response.
///
/// Retrieved by exact request-key match; may be stale relative to the live
/// resource. Writes are whole-value replacements, so concurrent fills for
/// the same key are last-write-wins with no corruption risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResponse {
    /// The HTTP status code at capture time.
    pub status: u16,
    /// The response headers at capture time.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
    /// Where the response came from.
    pub kind: ResponseKind,
    /// When the snapshot was taken.
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Snapshot a response for storage.
    pub fn snapshot(response: &Response) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
            body: response.body.clone(),
            kind: response.kind,
            stored_at: Utc::now(),
        }
    }

    /// Rehydrate the snapshot into a response.
    pub fn into_response(self) -> Response {
        Response::new(self.status, self.headers, self.body, self.kind)
    }

    /// Age of the snapshot.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.stored_at
    }
}
