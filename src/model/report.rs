//! Normalized accident reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields::{AccidentType, CasualtyCount, Severity, VehicleCount};

/// Text shown for a field the record does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Status every report is created with.
pub const INITIAL_STATUS: &str = "Unattended";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Report status as last written by the dispatch side.
///
/// Read-only here: the apps never transition it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatus(String);

impl ReportStatus {
    pub fn new(status: &str) -> Self {
        Self(status.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        Self::new(INITIAL_STATUS)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive fields shared by map reports and history rows.
///
/// Vocabulary fields are `None` when absent or outside the known set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub severity: Option<Severity>,
    pub accident_type: Option<AccidentType>,
    pub vehicles_involved: Option<VehicleCount>,
    pub casualties: Option<CasualtyCount>,
    pub status: ReportStatus,
    pub timestamp: DateTime<Utc>,
}

impl ReportDetails {
    pub fn severity_label(&self) -> &str {
        label_or_na(self.severity.as_ref())
    }

    pub fn type_label(&self) -> &str {
        label_or_na(self.accident_type.as_ref())
    }

    pub fn vehicles_label(&self) -> &str {
        label_or_na(self.vehicles_involved.as_ref())
    }

    pub fn casualties_label(&self) -> &str {
        label_or_na(self.casualties.as_ref())
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn label_or_na<T: AsRef<str>>(value: Option<&T>) -> &str {
    value.map(AsRef::as_ref).unwrap_or(NOT_AVAILABLE)
}

/// A report that can be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentReport {
    pub id: String,
    pub location: Coordinate,
    pub details: ReportDetails,
}

/// A row of the history list. Unlike [`AccidentReport`] it survives a
/// missing or malformed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: String,
    pub location: Option<Coordinate>,
    pub details: ReportDetails,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn details() -> ReportDetails {
        ReportDetails {
            severity: Some(Severity::Moderate),
            accident_type: None,
            vehicles_involved: Some(VehicleCount::MoreThanFour),
            casualties: None,
            status: ReportStatus::default(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_labels() {
        let d = details();
        assert_eq!(d.severity_label(), "Moderate");
        assert_eq!(d.type_label(), "N/A");
        assert_eq!(d.vehicles_label(), "More than 4");
        assert_eq!(d.casualties_label(), "N/A");
        assert_eq!(d.time_label(), "2024-01-01 08:30:00");
    }

    #[test]
    fn test_default_status() {
        assert_eq!(ReportStatus::default().as_str(), "Unattended");
        assert_eq!(ReportStatus::new("pending").to_string(), "pending");
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::new(8.88, 76.59).to_string(), "8.88,76.59");
    }
}
