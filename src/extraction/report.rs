//! Report extraction from stored documents.
//!
//! Maps raw documents onto [`AccidentReport`] and [`RecordRow`]. A document
//! without a numeric coordinate pair never reaches the map; it is dropped
//! with a debug line and nothing else.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::extraction::json_path::{resolve_json_path, resolve_vocabulary, value_as_number};
use crate::extraction::timestamp::resolve_timestamp;
use crate::logging::structured::LogContext;
use crate::model::{AccidentReport, Coordinate, RecordRow, ReportDetails, ReportStatus};
use crate::storage::{DocumentSnapshot, Snapshot};

/// Stored field names.
pub mod field {
    pub const LATITUDE: &str = "location.latitude";
    pub const LONGITUDE: &str = "location.longitude";
    pub const SEVERITY: &str = "severity";
    pub const ACCIDENT_TYPE: &str = "accidentType";
    pub const VEHICLES_INVOLVED: &str = "vehiclesInvolved";
    pub const CASUALTIES: &str = "casualties";
    pub const STATUS: &str = "status";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Read the coordinate pair; both halves must be JSON numbers.
pub fn extract_coordinate(data: &Value) -> Option<Coordinate> {
    let latitude = resolve_json_path(data, field::LATITUDE).and_then(value_as_number)?;
    let longitude = resolve_json_path(data, field::LONGITUDE).and_then(value_as_number)?;
    Some(Coordinate::new(latitude, longitude))
}

/// Read the descriptive fields of a document.
pub fn extract_details(data: &Value, now: DateTime<Utc>, ctx: &LogContext) -> ReportDetails {
    let status = resolve_json_path(data, field::STATUS)
        .and_then(Value::as_str)
        .map(ReportStatus::new)
        .unwrap_or_default();

    let timestamp = resolve_timestamp(resolve_json_path(data, field::TIMESTAMP), now);
    log::trace!("{} TIMESTAMP_RESOLVED source={:?}", ctx, timestamp.source);

    ReportDetails {
        severity: resolve_vocabulary(data, field::SEVERITY),
        accident_type: resolve_vocabulary(data, field::ACCIDENT_TYPE),
        vehicles_involved: resolve_vocabulary(data, field::VEHICLES_INVOLVED),
        casualties: resolve_vocabulary(data, field::CASUALTIES),
        status,
        timestamp: timestamp.value,
    }
}

/// Normalize one document for the map, or `None` if it has no usable
/// coordinate pair.
pub fn normalize_report(
    doc: &DocumentSnapshot,
    now: DateTime<Utc>,
    ctx: &LogContext,
) -> Option<AccidentReport> {
    let Some(location) = extract_coordinate(&doc.data) else {
        crate::log_debug!(ctx, "REPORT_DROPPED", id = doc.id, reason = "missing_coordinates");
        return None;
    };

    Some(AccidentReport {
        id: doc.id.clone(),
        location,
        details: extract_details(&doc.data, now, ctx),
    })
}

/// Normalize a full snapshot for the map, preserving delivery order.
///
/// The result depends only on the snapshot (and `now` for undated
/// documents); nothing carries over from earlier snapshots.
pub fn normalize_snapshot(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    ctx: &LogContext,
) -> Vec<AccidentReport> {
    snapshot
        .docs
        .iter()
        .filter_map(|doc| normalize_report(doc, now, ctx))
        .collect()
}

/// Normalize a full snapshot for the history list. Every document is kept.
pub fn normalize_records(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    ctx: &LogContext,
) -> Vec<RecordRow> {
    snapshot
        .docs
        .iter()
        .map(|doc| RecordRow {
            id: doc.id.clone(),
            location: extract_coordinate(&doc.data),
            details: extract_details(&doc.data, now, ctx),
        })
        .collect()
}
