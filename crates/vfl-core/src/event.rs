//! Boundary events delivered by the host runtime.

use serde::{Deserialize, Serialize};

use crate::request::Request;

/// Data echoed back by the host when a displayed notification is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationClick {
    /// Deduplication tag of the notification that was clicked.
    pub tag: String,
    /// Deep-link URL carried by the notification, if any.
    pub url: Option<String>,
}

/// One event delivered to the worker by the host runtime.
///
/// Each event is handled independently; the worker keeps no state across
/// events beyond the store itself.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// The worker version was installed; precache the offline manifest.
    Install,
    /// The worker version took over; purge superseded stores.
    Activate,
    /// A network request was intercepted.
    Fetch(Request),
    /// A push message arrived, with an optional JSON payload.
    Push(Option<serde_json::Value>),
    /// A displayed notification was activated.
    NotificationClick(NotificationClick),
    /// A background sync fired for the given tag.
    Sync(String),
}
