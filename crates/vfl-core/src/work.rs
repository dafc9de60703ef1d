//! Stay-alive tracking for detached background work.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Tracks background work so the host keeps the worker alive until it settles.
///
/// Some handlers detach asynchronous work instead of awaiting it - the
/// app-shell strategy returns its response before the store write behind it
/// completes. The host runtime must not tear the worker down while such work
/// is in flight, or the write is silently dropped. Every detached future is
/// spawned through the tracker, and hosts await [`WorkTracker::idle`] before
/// teardown.
///
/// Cloning the tracker shares the underlying count.
#[derive(Clone, Default)]
pub struct WorkTracker {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    active: AtomicUsize,
    released: Notify,
}

/// Keeps the worker alive until dropped.
pub struct WorkGuard {
    inner: Arc<Inner>,
}

impl WorkTracker {
    /// Create a new tracker with no outstanding work.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a guard that keeps the worker alive until dropped.
    pub fn hold(&self) -> WorkGuard {
        self.inner.active.fetch_add(1, Ordering::SeqCst);
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Spawn a future whose completion the worker lifetime must cover.
    ///
    /// The future runs detached; the tracker stays busy until it finishes
    /// (or panics - the guard is dropped either way).
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.hold();
        tokio::spawn(async move {
            let _guard = guard;
            future.await;
        });
    }

    /// Number of outstanding guards.
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Resolve once no guards remain.
    pub async fn idle(&self) {
        loop {
            // Register for the wakeup before checking, so a release between
            // the check and the await cannot be missed.
            let released = self.inner.released.notified();
            if self.inner.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            released.await;
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.inner.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.released.notify_waiters();
        }
    }
}
