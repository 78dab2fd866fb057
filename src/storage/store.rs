//! Store access interface.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::models::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Store permission denied")]
    PermissionDenied,

    #[error("Store rejected write: {reason}")]
    Rejected { reason: String },
}

/// Callback for a live query. Receives every full snapshot, or the error
/// that ended the query.
pub type SnapshotHandler = Box<dyn FnMut(Result<&Snapshot, &StoreError>) + Send>;

/// Access to the remote document store.
pub trait ReportStore: Send + Sync {
    /// Open a live query over `collection`. The handler sees the full
    /// matching set on every change until the returned [`Subscription`] is
    /// closed or dropped.
    ///
    /// Implementations may invoke the handler before returning, so callers
    /// must not hold locks the handler takes.
    fn subscribe(
        &self,
        collection: &str,
        on_snapshot: SnapshotHandler,
    ) -> Result<Subscription, StoreError>;

    /// Create one document and return its store-assigned identifier.
    fn create(&self, collection: &str, data: Value) -> Result<String, StoreError>;
}

/// Handle to a live query. Closing it stops callbacks before returning.
pub struct Subscription {
    id: String,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(id: &str, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id: id.to_string(),
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_unsubscribe_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut sub = Subscription::new("sub-1", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(sub.is_open());
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_open());
        drop(sub);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        {
            let _sub = Subscription::new("sub-2", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
