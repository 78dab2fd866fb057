//! Civilian accident report form.

use strum::IntoEnumIterator;
use thiserror::Error;

use crate::config::CoreConfig;
use crate::logging::structured::LogContext;
use crate::model::{AccidentType, CasualtyCount, Coordinate, Severity, VehicleCount};
use crate::routing::{coordinate_from_params, NavigationIntent, NavigationParams};
use crate::storage::{ReportStore, StoreError};
use crate::validation::{validate_draft, ReportDraft, ValidationError};

pub const SUBMITTED_MESSAGE: &str = "Accident report submitted successfully";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("There was an error submitting your report")]
    Store(#[from] StoreError),
}

/// A successfully created report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub report_id: String,
    pub message: &'static str,
    pub then: NavigationIntent,
}

/// Picker options: stored value plus label.
pub fn severity_options() -> Vec<(Severity, &'static str)> {
    Severity::iter().map(|s| (s, s.label())).collect()
}

pub fn accident_type_options() -> Vec<(AccidentType, &'static str)> {
    AccidentType::iter().map(|t| (t, t.label())).collect()
}

pub fn vehicle_count_options() -> Vec<(VehicleCount, &'static str)> {
    VehicleCount::iter().map(|v| (v, v.label())).collect()
}

pub fn casualty_count_options() -> Vec<(CasualtyCount, &'static str)> {
    CasualtyCount::iter().map(|c| (c, c.label())).collect()
}

pub struct ReportForm {
    ctx: LogContext,
    collection: String,
    draft: ReportDraft,
}

impl ReportForm {
    /// Open the form with the `lat`/`lng` route params from the home screen.
    pub fn open(params: &NavigationParams, config: &CoreConfig) -> Self {
        let ctx = LogContext::for_screen("report");
        let location = coordinate_from_params(params);
        crate::log_info!(ctx, "SCREEN_MOUNTED", has_location = location.is_some());
        Self {
            ctx,
            collection: config.reports_collection.clone(),
            draft: ReportDraft::at(location),
        }
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.draft.location
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.draft.severity = severity;
    }

    pub fn set_accident_type(&mut self, accident_type: AccidentType) {
        self.draft.accident_type = accident_type;
    }

    pub fn set_vehicles_involved(&mut self, vehicles: VehicleCount) {
        self.draft.vehicles_involved = vehicles;
    }

    pub fn set_casualties(&mut self, casualties: CasualtyCount) {
        self.draft.casualties = casualties;
    }

    /// Validate and create the report. Nothing is written when the
    /// location is missing.
    pub fn submit(&self, store: &dyn ReportStore) -> Result<Submitted, SubmitError> {
        let report = validate_draft(&self.draft).map_err(|e| {
            crate::log_warn!(self.ctx, "REPORT_SUBMIT_REJECTED", reason = e);
            e
        })?;

        let report_id = store
            .create(&self.collection, report.to_document())
            .map_err(|e| {
                crate::log_error!(self.ctx, "REPORT_SUBMIT_FAILED", error = e);
                e
            })?;

        crate::log_info!(
            self.ctx,
            "REPORT_SUBMITTED",
            id = report_id,
            severity = report.severity,
            accident_type = report.accident_type
        );

        Ok(Submitted {
            report_id,
            message: SUBMITTED_MESSAGE,
            then: NavigationIntent::Back,
        })
    }
}
