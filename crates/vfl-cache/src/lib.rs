//! Versioned named response stores for the VFL offline worker.
//!
//! This crate provides:
//! - `RequestKey` - request identity inside a store
//! - `StoredResponse` - immutable snapshot of a prior successful response
//! - `CacheStorage` trait + `MemoryStorage` - the backend seam
//! - `StoreRegistry` / `NamedStore` - version-scoped store naming and
//!   stale-store cleanup
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vfl_cache::{MemoryStorage, StoreRegistry};
//!
//! let registry = StoreRegistry::new(Arc::new(MemoryStorage::new()), "betpawa-vfl", "v5");
//! let primary = registry.primary();          // "betpawa-vfl-v5"
//! let fonts = registry.fonts();              // "betpawa-vfl-v5-fonts"
//! let purged = registry.purge_stale().await?; // drops every other version
//! ```

mod entry;
mod error;
mod key;
mod registry;
mod storage;

pub use entry::*;
pub use error::*;
pub use key::*;
pub use registry::*;
pub use storage::*;
