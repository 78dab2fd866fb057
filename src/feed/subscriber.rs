//! Report feed subscriber.
//!
//! Coordinates one live query for a screen:
//! 1. Open the subscription (failure -> `FeedState::Error`)
//! 2. On every snapshot, normalize the full set and replace the list
//! 3. On a query error, move to `FeedState::Error`
//! 4. On close, stop callbacks before returning
//!
//! The liveness flag is only cleared while holding the state lock, and
//! every write re-checks it under that lock, so a callback already running
//! on another thread when `close` returns cannot land.
//!
//! Undated reports resolve to the instant the feed was opened, so the
//! same snapshot always normalizes to the same list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::extraction::report::{normalize_records, normalize_snapshot};
use crate::logging::structured::LogContext;
use crate::model::{AccidentReport, RecordRow};
use crate::storage::{ReportStore, Snapshot, SnapshotHandler, StoreError, Subscription};

use super::context::FeedContext;

/// Why a feed has no data to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    PermissionDenied,
    SubscriptionUnavailable,
}

impl From<&StoreError> for FeedErrorKind {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::PermissionDenied => FeedErrorKind::PermissionDenied,
            _ => FeedErrorKind::SubscriptionUnavailable,
        }
    }
}

/// What a feed currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState<T> {
    Loading,
    Empty,
    Error(FeedErrorKind),
    Data(Vec<T>),
}

impl<T> FeedState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            FeedState::Data(items) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }
}

/// Snapshot normalizer: full snapshot in, full list out.
pub type Normalizer<T> = fn(&Snapshot, DateTime<Utc>, &LogContext) -> Vec<T>;

#[derive(Debug)]
struct FeedShared<T> {
    state: FeedState<T>,
    snapshots: u64,
}

/// One live query and the list it maintains.
pub struct ReportFeed<T> {
    ctx: FeedContext,
    shared: Arc<Mutex<FeedShared<T>>>,
    alive: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

/// Feed of map-placeable reports.
pub type MapFeed = ReportFeed<AccidentReport>;

/// Feed of history rows.
pub type RecordsFeed = ReportFeed<RecordRow>;

impl MapFeed {
    pub fn open_map(store: &dyn ReportStore, collection: &str, screen: &LogContext) -> Self {
        Self::open(store, collection, screen, normalize_snapshot)
    }
}

impl RecordsFeed {
    pub fn open_records(store: &dyn ReportStore, collection: &str, screen: &LogContext) -> Self {
        Self::open(store, collection, screen, normalize_records)
    }
}

impl<T: Clone + Send + 'static> ReportFeed<T> {
    /// Open a live query over `collection`.
    ///
    /// Never fails: an unavailable store leaves the feed in
    /// `FeedState::Error` and no retry is attempted.
    pub fn open(
        store: &dyn ReportStore,
        collection: &str,
        screen: &LogContext,
        normalize: Normalizer<T>,
    ) -> Self {
        let ctx = FeedContext::new(screen, collection);
        let log_ctx = ctx.log_context();
        let shared = Arc::new(Mutex::new(FeedShared {
            state: FeedState::Loading,
            snapshots: 0,
        }));
        let alive = Arc::new(AtomicBool::new(true));

        let handler = snapshot_handler(
            shared.clone(),
            alive.clone(),
            log_ctx.clone(),
            ctx.opened_at,
            normalize,
        );

        let subscription = match store.subscribe(collection, handler) {
            Ok(sub) => {
                crate::log_info!(
                    log_ctx,
                    "FEED_SUBSCRIBED",
                    collection = collection,
                    listener = sub.id()
                );
                Some(sub)
            }
            Err(e) => {
                crate::log_warn!(
                    log_ctx,
                    "FEED_SUBSCRIBE_FAILED",
                    collection = collection,
                    error = e
                );
                shared.lock().state = FeedState::Error(FeedErrorKind::from(&e));
                None
            }
        };

        Self {
            ctx,
            shared,
            alive,
            subscription,
        }
    }

    pub fn state(&self) -> FeedState<T> {
        self.shared.lock().state.clone()
    }

    /// Current list, empty unless the feed holds data.
    pub fn items(&self) -> Vec<T> {
        self.shared.lock().state.items().to_vec()
    }

    pub fn snapshots_seen(&self) -> u64 {
        self.shared.lock().snapshots
    }

    pub fn is_open(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn context(&self) -> &FeedContext {
        &self.ctx
    }

    /// Close the query. No state change happens after this returns.
    pub fn close(&mut self) {
        let was_open = {
            let _guard = self.shared.lock();
            self.alive.swap(false, Ordering::SeqCst)
        };
        if !was_open {
            return;
        }
        if let Some(mut sub) = self.subscription.take() {
            sub.unsubscribe();
        }
        crate::log_info!(
            self.ctx.log_context(),
            "FEED_CLOSED",
            snapshots = self.snapshots_seen()
        );
    }
}

impl<T> Drop for ReportFeed<T> {
    fn drop(&mut self) {
        {
            let _guard = self.shared.lock();
            self.alive.store(false, Ordering::SeqCst);
        }
        if let Some(mut sub) = self.subscription.take() {
            sub.unsubscribe();
        }
    }
}

fn snapshot_handler<T: Send + 'static>(
    shared: Arc<Mutex<FeedShared<T>>>,
    alive: Arc<AtomicBool>,
    ctx: LogContext,
    fallback_time: DateTime<Utc>,
    normalize: Normalizer<T>,
) -> SnapshotHandler {
    Box::new(move |event: Result<&Snapshot, &StoreError>| {
        if !alive.load(Ordering::SeqCst) {
            crate::log_debug!(ctx, "FEED_EVENT_AFTER_CLOSE", stage = "received");
            return;
        }

        // Normalize outside the lock; the write below re-checks liveness.
        let next = match event {
            Ok(snapshot) => {
                let items = normalize(snapshot, fallback_time, &ctx);
                crate::log_info!(
                    ctx,
                    "FEED_SNAPSHOT",
                    docs = snapshot.len(),
                    kept = items.len(),
                    dropped = snapshot.len() - items.len()
                );
                if items.is_empty() {
                    FeedState::Empty
                } else {
                    FeedState::Data(items)
                }
            }
            Err(e) => {
                crate::log_warn!(ctx, "FEED_ERROR", error = e);
                FeedState::Error(FeedErrorKind::from(e))
            }
        };

        let mut guard = shared.lock();
        if !alive.load(Ordering::SeqCst) {
            crate::log_debug!(ctx, "FEED_EVENT_AFTER_CLOSE", stage = "normalized");
            return;
        }
        if !matches!(next, FeedState::Error(_)) {
            guard.snapshots += 1;
        }
        guard.state = next;
    })
}
