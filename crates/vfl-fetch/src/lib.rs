//! Network fetch seam for the VFL offline worker.
//!
//! This crate provides:
//! - `Fetcher` trait - the seam the caching strategies depend on
//! - `FetchError` - transport-only error taxonomy
//! - `HttpFetcher` - reqwest-backed live implementation

mod client;
mod error;
mod fetcher;

pub use client::*;
pub use error::*;
pub use fetcher::*;
