//! Request routing and cache policy engine for the VFL offline worker.
//!
//! The worker intercepts network requests for the VFL predictions app and
//! serves them from a versioned local store or the live network according to
//! per-resource-class policy, so the app keeps working offline and repeat
//! loads stay fast.
//!
//! Each intercepted request is classified by URL into one of three classes,
//! each with a fixed strategy:
//! - API calls: network-only, with a synthesized offline JSON payload on
//!   failure
//! - font assets: cache-first, filling the font store on miss
//! - everything else (the app shell): cache-first with a detached background
//!   fill, falling back to the cached entry document for failed navigations
//!
//! # Example
//!
//! ```rust,ignore
//! use vfl_worker::{Worker, WorkerConfig};
//! use vfl_core::WorkerEvent;
//!
//! let worker = Worker::builder(WorkerConfig::default()).build();
//!
//! worker.handle(WorkerEvent::Install).await?;
//! worker.handle(WorkerEvent::Activate).await?;
//!
//! let response = worker.handle(WorkerEvent::Fetch(request)).await?;
//!
//! // Before teardown: let detached store writes settle.
//! worker.work().idle().await;
//! ```

mod classify;
mod config;
mod error;
mod hooks;
mod notify;
mod strategy;
mod worker;

pub use classify::*;
pub use config::*;
pub use error::*;
pub use hooks::*;
pub use notify::*;
pub use strategy::*;
pub use worker::*;
