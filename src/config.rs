//! Core configuration.
//!
//! Every field has a default matching the shipped apps, so hosts only
//! override what differs (a staging collection, another home region).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Map viewport: centre plus span.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            latitude: 8.8805,
            longitude: 76.5917,
            latitude_delta: 0.0922,
            longitude_delta: 0.0421,
        }
    }
}

/// Navigation route names the core emits intents for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub history: String,
    pub report: String,
    pub safety_guide: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            history: "/accidentRecords".to_string(),
            report: "/report".to_string(),
            safety_guide: "/Safety/guide".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Remote collection holding accident reports.
    pub reports_collection: String,
    pub default_region: RegionConfig,
    pub routes: RouteConfig,
    pub empty_records_message: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            reports_collection: "accidentReports".to_string(),
            default_region: RegionConfig::default(),
            routes: RouteConfig::default(),
            empty_records_message: "No accident records available.".to_string(),
        }
    }
}

impl CoreConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.reports_collection, "accidentReports");
        assert_eq!(config.routes.history, "/accidentRecords");
        assert_eq!(config.default_region.latitude_delta, 0.0922);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CoreConfig::from_json(
            r#"{"reports_collection": "stagingReports", "default_region": {"latitude": 10.0}}"#,
        )
        .unwrap();
        assert_eq!(config.reports_collection, "stagingReports");
        assert_eq!(config.default_region.latitude, 10.0);
        assert_eq!(config.default_region.longitude, 76.5917);
        assert_eq!(config.routes.report, "/report");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CoreConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
