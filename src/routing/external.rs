//! Links opened outside the app.

use std::fmt;

use crate::model::Coordinate;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A URL for the platform to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: String,
}

impl ExternalLink {
    /// Maps search centred on an accident, used by "Respond".
    pub fn maps_search(location: Coordinate) -> Self {
        Self {
            url: format!("{}{},{}", MAPS_SEARCH_BASE, location.latitude, location.longitude),
        }
    }
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
