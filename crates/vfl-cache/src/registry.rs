//! Version-scoped store naming and cleanup.

use std::sync::Arc;

use futures::future::join_all;

use crate::entry::StoredResponse;
use crate::error::CacheError;
use crate::key::RequestKey;
use crate::storage::CacheStorage;

/// Version-scoped view over cache storage.
///
/// Store names follow `{prefix}-{version}` for the primary store and
/// `{prefix}-{version}-fonts` for the auxiliary font store. A single version
/// string, injected at construction, controls which stores are current;
/// every store carrying a different tag is garbage and removed by
/// [`StoreRegistry::purge_stale`]. Bump the version whenever the offline
/// manifest changes so superseded stores are cleaned up on activation.
pub struct StoreRegistry {
    storage: Arc<dyn CacheStorage>,
    prefix: String,
    version: String,
}

impl StoreRegistry {
    /// Create a registry over the given backend.
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        prefix: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
            version: version.into(),
        }
    }

    /// Name of the current primary store.
    pub fn primary_name(&self) -> String {
        format!("{}-{}", self.prefix, self.version)
    }

    /// Name of the current font store.
    pub fn font_name(&self) -> String {
        format!("{}-fonts", self.primary_name())
    }

    /// Handle on the current primary store.
    pub fn primary(&self) -> NamedStore {
        NamedStore {
            storage: Arc::clone(&self.storage),
            name: self.primary_name(),
        }
    }

    /// Handle on the current font store.
    pub fn fonts(&self) -> NamedStore {
        NamedStore {
            storage: Arc::clone(&self.storage),
            name: self.font_name(),
        }
    }

    /// Enumerate all existing store names, current or not.
    pub async fn store_names(&self) -> Result<Vec<String>, CacheError> {
        self.storage.store_names().await
    }

    fn is_current(&self, name: &str) -> bool {
        name == self.primary_name() || name == self.font_name()
    }

    /// Delete every store not belonging to the current version tag.
    ///
    /// Deletes run concurrently. Returns the names that were removed.
    pub async fn purge_stale(&self) -> Result<Vec<String>, CacheError> {
        let stale: Vec<String> = self
            .store_names()
            .await?
            .into_iter()
            .filter(|name| !self.is_current(name))
            .collect();

        let results = join_all(stale.iter().map(|name| self.storage.delete_store(name))).await;

        let mut purged = Vec::new();
        for (name, result) in stale.into_iter().zip(results) {
            if result? {
                purged.push(name);
            }
        }
        Ok(purged)
    }
}

/// Handle on one named store.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct NamedStore {
    storage: Arc<dyn CacheStorage>,
    name: String,
}

impl NamedStore {
    /// The store's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a stored response by exact key match.
    pub async fn get(&self, key: &RequestKey) -> Result<Option<StoredResponse>, CacheError> {
        self.storage.get(&self.name, key).await
    }

    /// Store a response snapshot, replacing any existing value for the key.
    pub async fn put(&self, key: RequestKey, value: StoredResponse) -> Result<(), CacheError> {
        self.storage.put(&self.name, key, value).await
    }

    /// Delete a single entry.
    pub async fn delete(&self, key: &RequestKey) -> Result<(), CacheError> {
        self.storage.delete(&self.name, key).await
    }
}
