//! Accident records: the sequential history list.
//!
//! Rows come in store delivery order; no sort key is applied.

use thiserror::Error;

use crate::config::CoreConfig;
use crate::feed::{FeedErrorKind, FeedState, RecordsFeed};
use crate::logging::structured::LogContext;
use crate::model::RecordRow;
use crate::routing::{ExternalLink, NavigationIntent};
use crate::storage::ReportStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RespondError {
    #[error("Invalid location data for this accident.")]
    InvalidLocation,

    #[error("Unknown accident record: {0}")]
    UnknownRecord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordsView {
    Loading,
    Empty { message: String },
    Unavailable { kind: FeedErrorKind, message: String },
    List(Vec<RecordRow>),
}

fn unavailable_message(kind: FeedErrorKind) -> &'static str {
    match kind {
        FeedErrorKind::PermissionDenied => "You do not have access to accident records.",
        FeedErrorKind::SubscriptionUnavailable => "Accident records are unavailable right now.",
    }
}

pub struct RecordsScreen {
    ctx: LogContext,
    config: CoreConfig,
    feed: RecordsFeed,
    mounted: bool,
}

impl RecordsScreen {
    pub fn mount(store: &dyn ReportStore, config: CoreConfig) -> Self {
        let ctx = LogContext::for_screen("records");
        crate::log_info!(ctx, "SCREEN_MOUNTED");
        let feed = RecordsFeed::open_records(store, &config.reports_collection, &ctx);
        Self {
            ctx,
            config,
            feed,
            mounted: true,
        }
    }

    pub fn rows(&self) -> Vec<RecordRow> {
        self.feed.items()
    }

    pub fn render(&self) -> RecordsView {
        match self.feed.state() {
            FeedState::Loading => RecordsView::Loading,
            FeedState::Empty => RecordsView::Empty {
                message: self.config.empty_records_message.clone(),
            },
            FeedState::Error(kind) => RecordsView::Unavailable {
                kind,
                message: unavailable_message(kind).to_string(),
            },
            FeedState::Data(rows) => RecordsView::List(rows),
        }
    }

    /// "Respond" on a row: a maps search link for the accident location.
    pub fn respond(&self, record_id: &str) -> Result<ExternalLink, RespondError> {
        let rows = self.feed.items();
        let row = rows
            .iter()
            .find(|r| r.id == record_id)
            .ok_or_else(|| RespondError::UnknownRecord(record_id.to_string()))?;
        let location = row.location.ok_or(RespondError::InvalidLocation)?;

        crate::log_info!(self.ctx, "RECORD_RESPOND", id = record_id, location = location);
        Ok(ExternalLink::maps_search(location))
    }

    pub fn back(&self) -> NavigationIntent {
        NavigationIntent::Back
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.feed.close();
        crate::log_info!(self.ctx, "SCREEN_UNMOUNTED");
    }
}

impl Drop for RecordsScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
