//! The three caching strategies.
//!
//! Every strategy is total: each code path terminates in a valid response,
//! never an error. Transport failures resolve to a synthesized fallback;
//! store read failures degrade to a miss; store write failures are logged
//! and ignored.

use tracing::{debug, warn};
use vfl_cache::{NamedStore, RequestKey, StoredResponse};
use vfl_core::{Request, Response, ResponseKind, WorkTracker};
use vfl_fetch::Fetcher;

/// Offline fallback for API calls: a fixed JSON payload the app renders as
/// an empty result set.
pub fn offline_api_fallback() -> Response {
    Response::synthetic_json(&serde_json::json!({"error": "offline", "items": []}))
}

/// Offline fallback for font assets: empty 503.
pub fn offline_font_fallback() -> Response {
    Response::synthetic_empty(503)
}

/// Generic offline fallback: plain-text 503.
pub fn offline_fallback() -> Response {
    Response::synthetic_text(503, "Offline")
}

/// Network-only: live fetch, offline JSON payload on transport failure.
///
/// Never reads or writes any store.
pub async fn network_only(fetcher: &dyn Fetcher, request: &Request) -> Response {
    match fetcher.fetch(request).await {
        Ok(response) => response,
        Err(err) => {
            debug!(url = %request.url, error = %err, "api fetch failed, serving offline payload");
            offline_api_fallback()
        }
    }
}

/// Cache-first with fill: stored responses win; misses are fetched and the
/// snapshot is written before the response is returned.
///
/// After a transport failure the store is checked again for the same exact
/// key: interleaved fetch events mean a concurrent fill can land between
/// the first miss and the failure.
pub async fn cache_first_with_fill(
    store: &NamedStore,
    fetcher: &dyn Fetcher,
    request: &Request,
    key: &RequestKey,
) -> Response {
    match store.get(key).await {
        Ok(Some(stored)) => return stored.into_response(),
        Ok(None) => {}
        Err(err) => {
            warn!(store = store.name(), error = %err, "store read failed, treating as miss");
        }
    }

    match fetcher.fetch(request).await {
        Ok(response) => {
            if let Err(err) = store.put(key.clone(), StoredResponse::snapshot(&response)).await {
                warn!(store = store.name(), error = %err, "store write failed");
            }
            response
        }
        Err(err) => {
            debug!(url = %request.url, error = %err, "font fetch failed");
            match store.get(key).await {
                Ok(Some(stored)) => stored.into_response(),
                _ => offline_font_fallback(),
            }
        }
    }
}

/// Cache-first with background fill: stored responses win with no
/// revalidation; misses are fetched live and returned immediately, with the
/// store write detached through the work tracker.
///
/// Only successful same-origin responses are stored. On transport failure a
/// navigation falls back to the stored entry document (`offline_page`);
/// everything else gets the generic offline response.
pub async fn cache_first_with_background_fill(
    store: &NamedStore,
    fetcher: &dyn Fetcher,
    request: &Request,
    key: &RequestKey,
    offline_page: Option<&RequestKey>,
    work: &WorkTracker,
) -> Response {
    match store.get(key).await {
        Ok(Some(stored)) => return stored.into_response(),
        Ok(None) => {}
        Err(err) => {
            warn!(store = store.name(), error = %err, "store read failed, treating as miss");
        }
    }

    match fetcher.fetch(request).await {
        Ok(response) => {
            if response.status == 200 && response.kind == ResponseKind::Basic {
                let store = store.clone();
                let key = key.clone();
                let snapshot = StoredResponse::snapshot(&response);
                work.spawn(async move {
                    if let Err(err) = store.put(key, snapshot).await {
                        warn!(store = store.name(), error = %err, "background store write failed");
                    }
                });
            }
            response
        }
        Err(err) => {
            debug!(url = %request.url, error = %err, "shell fetch failed");
            if request.is_navigation() {
                if let Some(entry_key) = offline_page {
                    if let Ok(Some(stored)) = store.get(entry_key).await {
                        return stored.into_response();
                    }
                }
            }
            offline_fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use url::Url;
    use vfl_cache::{CacheError, CacheStorage, MemoryStorage, StoreRegistry};
    use vfl_core::RequestMode;
    use vfl_fetch::FetchError;

    // === Test doubles ===

    /// Fetcher that always fails, counting attempts.
    struct OfflineFetcher {
        calls: AtomicUsize,
    }

    impl OfflineFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, _request: &Request) -> Result<Response, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Connection("offline".to_string()))
        }
    }

    /// Fetcher that always returns one fixed response.
    struct FixedFetcher {
        response: Response,
    }

    #[async_trait]
    impl Fetcher for FixedFetcher {
        async fn fetch(&self, _request: &Request) -> Result<Response, FetchError> {
            Ok(self.response.clone())
        }
    }

    /// Storage whose first `get` reports a miss, then delegates.
    ///
    /// Simulates a concurrent fill landing between the lookup and a failed
    /// fetch.
    struct LateFillStorage {
        inner: MemoryStorage,
        gets: AtomicUsize,
    }

    #[async_trait]
    impl CacheStorage for LateFillStorage {
        async fn get(
            &self,
            store: &str,
            key: &RequestKey,
        ) -> Result<Option<StoredResponse>, CacheError> {
            if self.gets.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(None);
            }
            self.inner.get(store, key).await
        }

        async fn put(
            &self,
            store: &str,
            key: RequestKey,
            value: StoredResponse,
        ) -> Result<(), CacheError> {
            self.inner.put(store, key, value).await
        }

        async fn delete(&self, store: &str, key: &RequestKey) -> Result<(), CacheError> {
            self.inner.delete(store, key).await
        }

        async fn store_names(&self) -> Result<Vec<String>, CacheError> {
            self.inner.store_names().await
        }

        async fn delete_store(&self, store: &str) -> Result<bool, CacheError> {
            self.inner.delete_store(store).await
        }
    }

    fn make_request(url: &str) -> Request {
        Request::get(Url::parse(url).unwrap())
    }

    fn make_key(request: &Request) -> RequestKey {
        RequestKey::new(request, &[])
    }

    fn make_store(storage: Arc<dyn CacheStorage>) -> NamedStore {
        StoreRegistry::new(storage, "betpawa-vfl", "v5").primary()
    }

    fn basic_response(body: &[u8]) -> Response {
        Response::new(200, HashMap::new(), body.to_vec(), ResponseKind::Basic)
    }

    // === network_only ===

    #[tokio::test]
    async fn test_network_only_passes_response_through() {
        let fetcher = FixedFetcher {
            response: basic_response(b"live"),
        };
        let request = make_request("https://vfl-backend.up.railway.app/picks");

        let response = network_only(&fetcher, &request).await;
        assert_eq!(response.bytes(), b"live");
    }

    #[tokio::test]
    async fn test_network_only_offline_payload_is_bit_exact() {
        let fetcher = OfflineFetcher::new();
        let request = make_request("https://vfl-backend.up.railway.app/picks");

        let response = network_only(&fetcher, &request).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.text().unwrap(), r#"{"error":"offline","items":[]}"#);
    }

    // === cache_first_with_fill ===

    #[tokio::test]
    async fn test_font_hit_skips_network() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://fonts.gstatic.com/s/inter.woff2");
        let key = make_key(&request);
        store
            .put(key.clone(), StoredResponse::snapshot(&basic_response(b"woff2")))
            .await
            .unwrap();

        let fetcher = OfflineFetcher::new();
        let response = cache_first_with_fill(&store, &fetcher, &request, &key).await;

        assert_eq!(response.bytes(), b"woff2");
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_font_miss_fetches_and_fills() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://fonts.gstatic.com/s/inter.woff2");
        let key = make_key(&request);

        let fetcher = FixedFetcher {
            response: basic_response(b"woff2"),
        };
        let response = cache_first_with_fill(&store, &fetcher, &request, &key).await;

        assert_eq!(response.bytes(), b"woff2");
        // The fill was written before the response was returned.
        assert!(store.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_font_miss_then_failure_synthesizes_empty_503() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://fonts.gstatic.com/s/inter.woff2");
        let key = make_key(&request);

        let fetcher = OfflineFetcher::new();
        let response = cache_first_with_fill(&store, &fetcher, &request, &key).await;

        assert_eq!(response.status, 503);
        assert!(response.bytes().is_empty());
    }

    #[tokio::test]
    async fn test_font_failure_recovers_concurrent_fill() {
        // The entry exists, but the first lookup misses (a concurrent fill
        // lands after it). The post-failure re-check must find it.
        let inner = MemoryStorage::new();
        let request = make_request("https://fonts.gstatic.com/s/inter.woff2");
        let key = make_key(&request);
        inner
            .put(
                "betpawa-vfl-v5",
                key.clone(),
                StoredResponse::snapshot(&basic_response(b"woff2")),
            )
            .await
            .unwrap();

        let store = make_store(Arc::new(LateFillStorage {
            inner,
            gets: AtomicUsize::new(0),
        }));
        let fetcher = OfflineFetcher::new();
        let response = cache_first_with_fill(&store, &fetcher, &request, &key).await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(response.bytes(), b"woff2");
    }

    // === cache_first_with_background_fill ===

    #[tokio::test]
    async fn test_shell_hit_skips_network_and_revalidation() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://vfl.betpawa.app/index.html");
        let key = make_key(&request);
        store
            .put(key.clone(), StoredResponse::snapshot(&basic_response(b"<html>")))
            .await
            .unwrap();

        let fetcher = OfflineFetcher::new();
        let work = WorkTracker::new();
        let response =
            cache_first_with_background_fill(&store, &fetcher, &request, &key, None, &work).await;

        assert_eq!(response.bytes(), b"<html>");
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_shell_miss_returns_live_and_fills_in_background() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://vfl.betpawa.app/app.js");
        let key = make_key(&request);

        let fetcher = FixedFetcher {
            response: basic_response(b"js"),
        };
        let work = WorkTracker::new();
        let response =
            cache_first_with_background_fill(&store, &fetcher, &request, &key, None, &work).await;
        assert_eq!(response.bytes(), b"js");

        // The write is detached; it lands once the tracker drains.
        work.idle().await;
        assert!(store.get(&key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_shell_does_not_store_non_200_or_cross_origin() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let work = WorkTracker::new();

        let request = make_request("https://vfl.betpawa.app/missing.js");
        let key = make_key(&request);
        let fetcher = FixedFetcher {
            response: Response::new(404, HashMap::new(), Vec::new(), ResponseKind::Basic),
        };
        let response =
            cache_first_with_background_fill(&store, &fetcher, &request, &key, None, &work).await;
        assert_eq!(response.status, 404);

        let cross = make_request("https://cdn.example.com/logo.png");
        let cross_key = make_key(&cross);
        let fetcher = FixedFetcher {
            response: Response::new(200, HashMap::new(), b"png".to_vec(), ResponseKind::Cors),
        };
        let cross_response =
            cache_first_with_background_fill(&store, &fetcher, &cross, &cross_key, None, &work)
                .await;
        assert_eq!(cross_response.status, 200);

        work.idle().await;
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(store.get(&cross_key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_shell_navigation_failure_serves_entry_document() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let entry_request = make_request("https://vfl.betpawa.app/index.html");
        let entry_key = make_key(&entry_request);
        store
            .put(
                entry_key.clone(),
                StoredResponse::snapshot(&basic_response(b"<html>shell</html>")),
            )
            .await
            .unwrap();

        let request =
            make_request("https://vfl.betpawa.app/picks").with_mode(RequestMode::Navigate);
        let key = make_key(&request);
        let fetcher = OfflineFetcher::new();
        let work = WorkTracker::new();

        let response = cache_first_with_background_fill(
            &store,
            &fetcher,
            &request,
            &key,
            Some(&entry_key),
            &work,
        )
        .await;

        assert_eq!(response.bytes(), b"<html>shell</html>");
    }

    #[tokio::test]
    async fn test_shell_failure_without_navigation_is_offline_503() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let request = make_request("https://vfl.betpawa.app/app.js");
        let key = make_key(&request);
        let fetcher = OfflineFetcher::new();
        let work = WorkTracker::new();

        let response =
            cache_first_with_background_fill(&store, &fetcher, &request, &key, None, &work).await;

        assert_eq!(response.status, 503);
        assert_eq!(response.bytes(), b"Offline");
    }

    #[tokio::test]
    async fn test_shell_navigation_failure_without_entry_degrades_to_503() {
        let store = make_store(Arc::new(MemoryStorage::new()));
        let entry_request = make_request("https://vfl.betpawa.app/index.html");
        let entry_key = make_key(&entry_request);

        let request =
            make_request("https://vfl.betpawa.app/picks").with_mode(RequestMode::Navigate);
        let key = make_key(&request);
        let fetcher = OfflineFetcher::new();
        let work = WorkTracker::new();

        let response = cache_first_with_background_fill(
            &store,
            &fetcher,
            &request,
            &key,
            Some(&entry_key),
            &work,
        )
        .await;

        assert_eq!(response.status, 503);
        assert_eq!(response.bytes(), b"Offline");
    }
}
