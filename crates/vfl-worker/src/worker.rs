//! The worker engine: lifecycle, classification, and event dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};
use vfl_cache::{CacheStorage, MemoryStorage, RequestKey, StoreRegistry, StoredResponse};
use vfl_core::{NotificationClick, Request, Response, WorkTracker, WorkerEvent};
use vfl_fetch::{Fetcher, HttpFetcher};

use crate::classify::{Classifier, RequestClass};
use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::hooks::{ClientGateway, NoopGateway, PushHandler, SyncHandler};
use crate::notify::DefaultPushHandler;
use crate::strategy;

/// Sync tag recognized out of the box.
pub const SYNC_RESULTS_TAG: &str = "sync-results";

/// Placeholder for future result tracking.
struct ResultsSyncHandler;

#[async_trait]
impl SyncHandler for ResultsSyncHandler {
    async fn run(&self) -> anyhow::Result<()> {
        info!("background sync: results");
        Ok(())
    }
}

/// The request router and cache policy engine.
///
/// Owns the versioned stores, the classifier, and the host seams. One worker
/// serves many interleaved events; it keeps no per-request state.
pub struct Worker {
    config: WorkerConfig,
    classifier: Classifier,
    registry: StoreRegistry,
    fetcher: Arc<dyn Fetcher>,
    gateway: Arc<dyn ClientGateway>,
    push_handler: Arc<dyn PushHandler>,
    sync_handlers: HashMap<String, Arc<dyn SyncHandler>>,
    work: WorkTracker,
}

impl Worker {
    /// Start building a worker.
    pub fn builder(config: WorkerConfig) -> WorkerBuilder {
        WorkerBuilder::new(config)
    }

    /// The active configuration.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// The stay-alive tracker. Hosts await [`WorkTracker::idle`] before
    /// teardown so detached store writes are not dropped.
    pub fn work(&self) -> &WorkTracker {
        &self.work
    }

    /// Dispatch one host runtime event.
    ///
    /// Only `Fetch` produces a response.
    pub async fn handle(&self, event: WorkerEvent) -> Result<Option<Response>, WorkerError> {
        match event {
            WorkerEvent::Install => {
                self.install().await;
                Ok(None)
            }
            WorkerEvent::Activate => {
                self.activate().await?;
                Ok(None)
            }
            WorkerEvent::Fetch(request) => Ok(Some(self.handle_fetch(&request).await)),
            WorkerEvent::Push(payload) => {
                self.push(payload.as_ref()).await;
                Ok(None)
            }
            WorkerEvent::NotificationClick(click) => {
                self.notification_click(&click).await;
                Ok(None)
            }
            WorkerEvent::Sync(tag) => {
                self.sync(&tag).await;
                Ok(None)
            }
        }
    }

    /// Precache the offline manifest into the primary store.
    ///
    /// Failures are per-asset: an unfetchable asset is logged and skipped,
    /// install completes with a partial cache, and an already-cached copy is
    /// never removed by a failed refetch. Completes by requesting immediate
    /// takeover from the previous version.
    pub async fn install(&self) {
        let store = self.registry.primary();

        for path in &self.config.offline_manifest {
            let url = match self.config.origin.join(path) {
                Ok(url) => url,
                Err(err) => {
                    warn!(path = %path, error = %err, "manifest path does not resolve, skipping");
                    continue;
                }
            };
            let request = Request::get(url);

            match self.fetcher.fetch(&request).await {
                Ok(response) if response.is_success() => {
                    let key = self.request_key(&request);
                    if let Err(err) = store.put(key, StoredResponse::snapshot(&response)).await {
                        warn!(path = %path, error = %err, "precache write failed");
                    }
                }
                Ok(response) => {
                    warn!(path = %path, status = response.status, "precache fetch unsuccessful, skipping");
                }
                Err(err) => {
                    warn!(path = %path, error = %err, "precache fetch failed, skipping");
                }
            }
        }

        info!(store = %store.name(), "install complete, requesting takeover");
        self.gateway.take_over().await;
    }

    /// Purge every store carrying a different version tag, then claim open
    /// clients. Returns the purged store names.
    pub async fn activate(&self) -> Result<Vec<String>, WorkerError> {
        let purged = self.registry.purge_stale().await?;
        if !purged.is_empty() {
            info!(stores = ?purged, "stale stores removed");
        }
        self.gateway.claim().await;
        Ok(purged)
    }

    /// Route one intercepted request through its class's strategy.
    ///
    /// Total: every path returns a valid response.
    pub async fn handle_fetch(&self, request: &Request) -> Response {
        let class = self.classifier.classify(request);
        debug!(url = %request.url, class = %class, "dispatching request");

        let key = self.request_key(request);
        match class {
            RequestClass::Api => strategy::network_only(self.fetcher.as_ref(), request).await,
            RequestClass::FontAsset => {
                strategy::cache_first_with_fill(
                    &self.registry.fonts(),
                    self.fetcher.as_ref(),
                    request,
                    &key,
                )
                .await
            }
            RequestClass::AppShell => {
                let entry_key = self.entry_document_key();
                strategy::cache_first_with_background_fill(
                    &self.registry.primary(),
                    self.fetcher.as_ref(),
                    request,
                    &key,
                    entry_key.as_ref(),
                    &self.work,
                )
                .await
            }
        }
    }

    /// Display the notification for an incoming push.
    pub async fn push(&self, payload: Option<&Value>) {
        let notification = self.push_handler.handle(payload).await;
        self.gateway.show_notification(&notification).await;
    }

    /// Run the registered handler for a fired sync tag, if any.
    pub async fn sync(&self, tag: &str) {
        match self.sync_handlers.get(tag) {
            Some(handler) => {
                if let Err(err) = handler.run().await {
                    warn!(tag, error = %err, "sync handler failed");
                }
            }
            None => debug!(tag, "no handler registered for sync tag"),
        }
    }

    /// Open the deep-link carried by an activated notification.
    pub async fn notification_click(&self, click: &NotificationClick) {
        let url = click.url.as_deref().unwrap_or("/");
        self.gateway.open(url).await;
    }

    fn request_key(&self, request: &Request) -> RequestKey {
        RequestKey::new(request, &self.config.vary_headers)
    }

    fn entry_document_key(&self) -> Option<RequestKey> {
        let url = self.config.origin.join(&self.config.entry_document).ok()?;
        Some(self.request_key(&Request::get(url)))
    }
}

/// Builds a [`Worker`], defaulting every seam.
///
/// Defaults: in-memory storage, live HTTP fetcher, no-op gateway, built-in
/// push defaulting, and the `sync-results` placeholder handler.
pub struct WorkerBuilder {
    config: WorkerConfig,
    storage: Option<Arc<dyn CacheStorage>>,
    fetcher: Option<Arc<dyn Fetcher>>,
    gateway: Option<Arc<dyn ClientGateway>>,
    push_handler: Option<Arc<dyn PushHandler>>,
    sync_handlers: HashMap<String, Arc<dyn SyncHandler>>,
}

impl WorkerBuilder {
    /// Create a builder for the given configuration.
    pub fn new(config: WorkerConfig) -> Self {
        let mut sync_handlers: HashMap<String, Arc<dyn SyncHandler>> = HashMap::new();
        sync_handlers.insert(SYNC_RESULTS_TAG.to_string(), Arc::new(ResultsSyncHandler));

        Self {
            config,
            storage: None,
            fetcher: None,
            gateway: None,
            push_handler: None,
            sync_handlers,
        }
    }

    /// Use a specific storage backend.
    pub fn with_storage(mut self, storage: Arc<dyn CacheStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a specific fetcher.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a specific client gateway.
    pub fn with_gateway(mut self, gateway: Arc<dyn ClientGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Replace the push handling extension point.
    pub fn with_push_handler(mut self, handler: Arc<dyn PushHandler>) -> Self {
        self.push_handler = Some(handler);
        self
    }

    /// Register a sync handler for a tag, replacing any existing one.
    pub fn with_sync_handler(mut self, tag: impl Into<String>, handler: Arc<dyn SyncHandler>) -> Self {
        self.sync_handlers.insert(tag.into(), handler);
        self
    }

    /// Build the worker.
    pub fn build(self) -> Worker {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let registry = StoreRegistry::new(
            storage,
            self.config.store_prefix.clone(),
            self.config.version.clone(),
        );
        let classifier = Classifier::from_config(&self.config);

        Worker {
            classifier,
            registry,
            fetcher: self.fetcher.unwrap_or_else(|| Arc::new(HttpFetcher::new())),
            gateway: self.gateway.unwrap_or_else(|| Arc::new(NoopGateway)),
            push_handler: self
                .push_handler
                .unwrap_or_else(|| Arc::new(DefaultPushHandler)),
            sync_handlers: self.sync_handlers,
            work: WorkTracker::new(),
            config: self.config,
        }
    }
}
