//! Storage backend seam and the in-memory backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entry::StoredResponse;
use crate::error::CacheError;
use crate::key::RequestKey;

/// Backend for named response stores.
///
/// A store is created implicitly by its first write. Writes are whole-value
/// replacements keyed by exact request identity.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Get a stored response by exact key match.
    async fn get(&self, store: &str, key: &RequestKey) -> Result<Option<StoredResponse>, CacheError>;

    /// Store a response snapshot, replacing any existing value for the key.
    async fn put(&self, store: &str, key: RequestKey, value: StoredResponse) -> Result<(), CacheError>;

    /// Delete a single entry.
    async fn delete(&self, store: &str, key: &RequestKey) -> Result<(), CacheError>;

    /// Enumerate all existing store names.
    async fn store_names(&self) -> Result<Vec<String>, CacheError>;

    /// Destroy a whole store. Returns whether it existed.
    async fn delete_store(&self, store: &str) -> Result<bool, CacheError>;
}

/// In-memory storage backend.
///
/// The default backend for a single worker process: nested maps behind a
/// `tokio` read-write lock.
#[derive(Default)]
pub struct MemoryStorage {
    stores: RwLock<HashMap<String, HashMap<RequestKey, StoredResponse>>>,
}

impl MemoryStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn get(&self, store: &str, key: &RequestKey) -> Result<Option<StoredResponse>, CacheError> {
        let stores = self.stores.read().await;
        Ok(stores.get(store).and_then(|entries| entries.get(key)).cloned())
    }

    async fn put(&self, store: &str, key: RequestKey, value: StoredResponse) -> Result<(), CacheError> {
        let mut stores = self.stores.write().await;
        stores.entry(store.to_string()).or_default().insert(key, value);
        Ok(())
    }

    async fn delete(&self, store: &str, key: &RequestKey) -> Result<(), CacheError> {
        let mut stores = self.stores.write().await;
        if let Some(entries) = stores.get_mut(store) {
            entries.remove(key);
        }
        Ok(())
    }

    async fn store_names(&self) -> Result<Vec<String>, CacheError> {
        let stores = self.stores.read().await;
        let mut names: Vec<String> = stores.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_store(&self, store: &str) -> Result<bool, CacheError> {
        let mut stores = self.stores.write().await;
        Ok(stores.remove(store).is_some())
    }
}
