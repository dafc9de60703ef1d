//! Core primitives for the VFL offline worker.
//!
//! This crate provides the types shared by the cache, fetch, and worker
//! crates:
//! - `Request` / `Response` - intercepted request and response values
//! - `WorkerEvent` - boundary events delivered by the host runtime
//! - `WorkTracker` - scoped stay-alive guard for detached background work

mod event;
mod request;
mod response;
mod work;

pub use event::*;
pub use request::*;
pub use response::*;
pub use work::*;
