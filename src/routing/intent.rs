//! Navigation intents.

use std::collections::BTreeMap;

use crate::model::Coordinate;

/// Route parameters, as the host router passes them: all strings.
pub type NavigationParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    Push {
        route: String,
        params: NavigationParams,
    },
    Back,
}

impl NavigationIntent {
    pub fn push(route: &str) -> Self {
        NavigationIntent::Push {
            route: route.to_string(),
            params: NavigationParams::new(),
        }
    }

    pub fn with_param(self, key: &str, value: &str) -> Self {
        match self {
            NavigationIntent::Push { route, mut params } => {
                params.insert(key.to_string(), value.to_string());
                NavigationIntent::Push { route, params }
            }
            NavigationIntent::Back => NavigationIntent::Back,
        }
    }

    pub fn route(&self) -> Option<&str> {
        match self {
            NavigationIntent::Push { route, .. } => Some(route),
            NavigationIntent::Back => None,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        match self {
            NavigationIntent::Push { params, .. } => params.get(key).map(String::as_str),
            NavigationIntent::Back => None,
        }
    }
}

/// Read a coordinate from `lat`/`lng` route parameters.
///
/// Unparsable, non-finite and zero values count as missing.
pub fn coordinate_from_params(params: &NavigationParams) -> Option<Coordinate> {
    let read = |key: &str| {
        params
            .get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v != 0.0)
    };
    Some(Coordinate::new(read("lat")?, read("lng")?))
}
