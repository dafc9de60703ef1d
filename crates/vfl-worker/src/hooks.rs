//! Host runtime seams and extension points.

use async_trait::async_trait;
use serde_json::Value;

use crate::notify::Notification;

/// Host runtime seam for client and notification control.
///
/// The worker never talks to windows or the notification surface directly;
/// it asks the gateway. All operations are best-effort from the worker's
/// point of view.
#[async_trait]
pub trait ClientGateway: Send + Sync {
    /// Request immediate takeover from a previous worker version, without
    /// waiting for its clients to close.
    async fn take_over(&self);

    /// Claim open clients so this version controls them without a reload.
    async fn claim(&self);

    /// Open or focus a window at the given URL.
    async fn open(&self, url: &str);

    /// Display a notification.
    async fn show_notification(&self, notification: &Notification);
}

/// Gateway that does nothing. For tests and headless use.
pub struct NoopGateway;

#[async_trait]
impl ClientGateway for NoopGateway {
    async fn take_over(&self) {}
    async fn claim(&self) {}
    async fn open(&self, _url: &str) {}
    async fn show_notification(&self, _notification: &Notification) {}
}

/// Extension point: turns a push payload into the notification to display.
#[async_trait]
pub trait PushHandler: Send + Sync {
    /// Build the notification for an incoming push.
    async fn handle(&self, payload: Option<&Value>) -> Notification;
}

/// Extension point: background sync work, registered per tag.
#[async_trait]
pub trait SyncHandler: Send + Sync {
    /// Run the sync work for one fired event.
    async fn run(&self) -> anyhow::Result<()>;
}
