//! Push notification payloads and defaults.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hooks::PushHandler;

/// Default notification title.
pub const DEFAULT_TITLE: &str = "BetPawa VFL — New Pick!";
/// Default notification body.
pub const DEFAULT_BODY: &str = "A new qualified prediction is available.";
/// Icon and badge path.
pub const DEFAULT_ICON: &str = "/icon-192.png";
/// Deduplication tag: repeat pushes replace the previous notification.
pub const NOTIFICATION_TAG: &str = "vfl-pick";

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Icon asset path.
    pub icon: String,
    /// Badge asset path.
    pub badge: String,
    /// Deduplication tag.
    pub tag: String,
    /// Whether a repeat notification with the same tag re-alerts.
    pub renotify: bool,
    /// Deep-link opened when the notification is activated.
    pub url: String,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_ICON.to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            renotify: true,
            url: "/".to_string(),
        }
    }
}

/// Built-in push handling: field defaulting over the optional payload.
///
/// Only `title` and `body` are honored from the payload; icon, badge, tag,
/// and deep-link stay fixed.
pub struct DefaultPushHandler;

#[async_trait]
impl PushHandler for DefaultPushHandler {
    async fn handle(&self, payload: Option<&Value>) -> Notification {
        let mut notification = Notification::default();
        if let Some(payload) = payload {
            if let Some(title) = payload.get("title").and_then(Value::as_str) {
                notification.title = title.to_string();
            }
            if let Some(body) = payload.get("body").and_then(Value::as_str) {
                notification.body = body.to_string();
            }
        }
        notification
    }
}
