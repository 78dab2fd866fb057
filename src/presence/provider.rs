//! Device location interface.

use std::collections::VecDeque;

use parking_lot::Mutex;
use thiserror::Error;

use crate::model::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission required")]
    PermissionDenied,

    #[error("{reason}")]
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Completion for a one-shot position request.
pub type PositionCallback = Box<dyn FnOnce(Result<Coordinate, LocationError>) + Send>;

/// Platform location services.
pub trait LocationProvider: Send + Sync {
    /// Ask for foreground location permission.
    fn request_permission(&self) -> PermissionStatus;

    /// Device-cached position from an earlier fix, if any.
    fn last_known_position(&self) -> Result<Option<Coordinate>, LocationError>;

    /// One-shot current position. `on_fix` may run before this returns or
    /// at any later time, on any thread.
    fn current_position(&self, on_fix: PositionCallback);
}

#[derive(Default)]
struct ManualState {
    permission: Option<PermissionStatus>,
    last_known: Option<Coordinate>,
    pending: VecDeque<PositionCallback>,
    permission_requests: usize,
}

/// Location provider driven by its owner.
///
/// Position requests stay pending until [`ManualLocationProvider::resolve`]
/// is called, so fixes can arrive in any order relative to the screen
/// lifecycle. Hosts that receive fixes through their own event loop can
/// use it as the bridge.
#[derive(Default)]
pub struct ManualLocationProvider {
    state: Mutex<ManualState>,
}

impl ManualLocationProvider {
    /// Provider with permission granted and no cached position.
    pub fn granted() -> Self {
        let provider = Self::default();
        provider.set_permission(PermissionStatus::Granted);
        provider
    }

    pub fn denied() -> Self {
        let provider = Self::default();
        provider.set_permission(PermissionStatus::Denied);
        provider
    }

    pub fn with_last_known(self, coordinate: Coordinate) -> Self {
        self.set_last_known(Some(coordinate));
        self
    }

    pub fn set_permission(&self, status: PermissionStatus) {
        self.state.lock().permission = Some(status);
    }

    pub fn set_last_known(&self, coordinate: Option<Coordinate>) {
        self.state.lock().last_known = coordinate;
    }

    pub fn pending_requests(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn permission_requests(&self) -> usize {
        self.state.lock().permission_requests
    }

    /// Complete the oldest pending request. Returns false if none is
    /// pending.
    pub fn resolve(&self, result: Result<Coordinate, LocationError>) -> bool {
        // Released before the callback runs; it may call back into us.
        let callback = self.state.lock().pending.pop_front();
        match callback {
            Some(on_fix) => {
                on_fix(result);
                true
            }
            None => false,
        }
    }
}

impl LocationProvider for ManualLocationProvider {
    fn request_permission(&self) -> PermissionStatus {
        let mut state = self.state.lock();
        state.permission_requests += 1;
        state.permission.unwrap_or(PermissionStatus::Denied)
    }

    fn last_known_position(&self) -> Result<Option<Coordinate>, LocationError> {
        let state = self.state.lock();
        match state.permission {
            Some(PermissionStatus::Granted) => Ok(state.last_known),
            _ => Err(LocationError::PermissionDenied),
        }
    }

    fn current_position(&self, on_fix: PositionCallback) {
        let denied = {
            let mut state = self.state.lock();
            if state.permission == Some(PermissionStatus::Granted) {
                state.pending.push_back(on_fix);
                return;
            }
            on_fix
        };
        denied(Err(LocationError::PermissionDenied));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_requests_stay_pending_until_resolved() {
        let provider = ManualLocationProvider::granted();
        let got = Arc::new(Mutex::new(None));
        let sink = got.clone();
        provider.current_position(Box::new(move |r: Result<Coordinate, LocationError>| *sink.lock() = Some(r)));
        assert_eq!(provider.pending_requests(), 1);
        assert!(got.lock().is_none());

        assert!(provider.resolve(Ok(Coordinate::new(1.0, 2.0))));
        assert_eq!(*got.lock(), Some(Ok(Coordinate::new(1.0, 2.0))));
        assert!(!provider.resolve(Ok(Coordinate::new(0.0, 0.0))));
    }

    #[test]
    fn test_denied_resolves_immediately() {
        let provider = ManualLocationProvider::denied();
        assert_eq!(provider.request_permission(), PermissionStatus::Denied);
        assert_eq!(
            provider.last_known_position(),
            Err(LocationError::PermissionDenied)
        );
        let got = Arc::new(Mutex::new(None));
        let sink = got.clone();
        provider.current_position(Box::new(move |r: Result<Coordinate, LocationError>| *sink.lock() = Some(r)));
        assert_eq!(*got.lock(), Some(Err(LocationError::PermissionDenied)));
        assert_eq!(provider.pending_requests(), 0);
    }

    #[test]
    fn test_last_known() {
        let provider = ManualLocationProvider::granted().with_last_known(Coordinate::new(3.0, 4.0));
        assert_eq!(
            provider.last_known_position(),
            Ok(Some(Coordinate::new(3.0, 4.0)))
        );
        assert_eq!(provider.permission_requests(), 0);
    }
}
