//! Location acquisition bound to a screen's lifetime.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::logging::structured::LogContext;
use crate::model::Coordinate;
use crate::presence::{
    LocationError, LocationProvider, LocationSample, LocationTracker, PermissionStatus,
};

/// How an acquisition run started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireStart {
    /// A current-position request is in flight.
    Requested,
    PermissionDenied,
}

/// Which positions a screen wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireMode {
    /// Last-known position first, then a fresh fix.
    CachedThenLive,
    LiveOnly,
}

/// Owns a screen's location state. Results that resolve after
/// [`LocationSession::close`] are discarded.
pub struct LocationSession {
    ctx: LogContext,
    locator: Arc<dyn LocationProvider>,
    tracker: Arc<Mutex<LocationTracker>>,
    alive: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl LocationSession {
    pub fn new(locator: Arc<dyn LocationProvider>, ctx: &LogContext) -> Self {
        Self {
            ctx: ctx.clone(),
            locator,
            tracker: Arc::new(Mutex::new(LocationTracker::new())),
            alive: Arc::new(AtomicBool::new(true)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run one acquisition: permission, optional last-known position, then
    /// a one-shot fix.
    ///
    /// Only the newest run may set an error; a live fix from any run is
    /// still accepted.
    pub fn acquire(&self, mode: AcquireMode) -> AcquireStart {
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if self.locator.request_permission() == PermissionStatus::Denied {
            crate::log_warn!(self.ctx, "LOCATION_PERMISSION_DENIED", run = run);
            self.write(|tracker| tracker.set_error(LocationError::PermissionDenied));
            return AcquireStart::PermissionDenied;
        }

        if mode == AcquireMode::CachedThenLive {
            match self.locator.last_known_position() {
                Ok(Some(coordinate)) => {
                    let accepted = self
                        .write(|tracker| tracker.offer(LocationSample::cached(coordinate)))
                        .unwrap_or(false);
                    crate::log_info!(
                        self.ctx,
                        "LOCATION_CACHED",
                        coordinate = coordinate,
                        accepted = accepted
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    crate::log_warn!(self.ctx, "LOCATION_LAST_KNOWN_FAILED", error = e);
                }
            }
        }

        let tracker = self.tracker.clone();
        let alive = self.alive.clone();
        let generation = self.generation.clone();
        let ctx = self.ctx.clone();
        self.locator.current_position(Box::new(
            move |result: Result<Coordinate, LocationError>| {
                let mut tracker = tracker.lock();
                if !alive.load(Ordering::SeqCst) {
                    crate::log_debug!(ctx, "LOCATION_DISCARDED_AFTER_UNMOUNT", run = run);
                    return;
                }
                match result {
                    Ok(coordinate) => {
                        tracker.offer(LocationSample::live(coordinate));
                        crate::log_info!(ctx, "LOCATION_LIVE", coordinate = coordinate, run = run);
                    }
                    Err(e) => {
                        crate::log_warn!(ctx, "LOCATION_FIX_FAILED", error = e, run = run);
                        if generation.load(Ordering::SeqCst) == run {
                            tracker.set_error(e);
                        }
                    }
                }
            },
        ));

        AcquireStart::Requested
    }

    /// Apply `f` to the tracker unless the session is closed. Liveness is
    /// checked under the tracker lock, the same lock `close` takes.
    fn write<R>(&self, f: impl FnOnce(&mut LocationTracker) -> R) -> Option<R> {
        let mut tracker = self.tracker.lock();
        if !self.alive.load(Ordering::SeqCst) {
            return None;
        }
        Some(f(&mut tracker))
    }

    /// Clear the error and start a new run.
    pub fn retry(&self, mode: AcquireMode) -> AcquireStart {
        self.write(LocationTracker::clear_error);
        self.acquire(mode)
    }

    pub fn sample(&self) -> Option<LocationSample> {
        self.tracker.lock().current()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.sample().map(|s| s.coordinate)
    }

    pub fn error(&self) -> Option<LocationError> {
        self.tracker.lock().error().cloned()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Stop accepting results. A callback already running on another
    /// thread either finishes before this returns or changes nothing.
    pub fn close(&self) {
        let _tracker = self.tracker.lock();
        self.alive.store(false, Ordering::SeqCst);
    }
}
