//! Report drafts.

use thiserror::Error;

use crate::model::{AccidentType, CasualtyCount, Coordinate, Severity, VehicleCount};
use crate::storage::NewReport;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Location data is missing")]
    MissingLocation,
}

/// The report form's current selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub severity: Severity,
    pub accident_type: AccidentType,
    pub vehicles_involved: VehicleCount,
    pub casualties: CasualtyCount,
    pub location: Option<Coordinate>,
}

impl ReportDraft {
    pub fn at(location: Option<Coordinate>) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }
}

/// Turn a draft into a creatable report.
pub fn validate_draft(draft: &ReportDraft) -> Result<NewReport, ValidationError> {
    let location = draft.location.ok_or(ValidationError::MissingLocation)?;

    Ok(NewReport {
        severity: draft.severity,
        accident_type: draft.accident_type,
        vehicles_involved: draft.vehicles_involved,
        casualties: draft.casualties,
        location,
    })
}
