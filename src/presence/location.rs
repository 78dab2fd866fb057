//! Current device location.

use crate::model::Coordinate;

use super::provider::LocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Fresh fix from this mount.
    Live,
    /// Device-cached position from an earlier fix.
    Cached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    pub freshness: Freshness,
}

impl LocationSample {
    pub fn live(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            freshness: Freshness::Live,
        }
    }

    pub fn cached(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            freshness: Freshness::Cached,
        }
    }

    pub fn is_live(&self) -> bool {
        self.freshness == Freshness::Live
    }
}

/// Holds at most one sample plus the last acquisition error.
///
/// A cached sample never replaces a live one.
#[derive(Debug, Default)]
pub struct LocationTracker {
    current: Option<LocationSample>,
    error: Option<LocationError>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample; returns whether it became current.
    pub fn offer(&mut self, sample: LocationSample) -> bool {
        let accept = match (&self.current, sample.freshness) {
            (_, Freshness::Live) => true,
            (Some(current), Freshness::Cached) => !current.is_live(),
            (None, Freshness::Cached) => true,
        };
        if accept {
            self.current = Some(sample);
        }
        accept
    }

    pub fn current(&self) -> Option<LocationSample> {
        self.current
    }

    pub fn has_sample(&self) -> bool {
        self.current.is_some()
    }

    pub fn error(&self) -> Option<&LocationError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: LocationError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
