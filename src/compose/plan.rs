//! Driver map render plan.

use crate::config::RegionConfig;
use crate::feed::{FeedErrorKind, FeedState};
use crate::model::{AccidentReport, Coordinate};
use crate::presence::{LocationError, LocationSample, Presence};

pub const REPORT_PIN_COLOR: &str = "#FF0000";
pub const CALLOUT_TITLE: &str = "Accident Report";
pub const RETRY_LABEL: &str = "Retry";

/// Visible map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Centre on `centre` when known, else on the configured default.
    /// Spans always come from configuration.
    pub fn centred_on(config: &RegionConfig, centre: Option<Coordinate>) -> Self {
        let (latitude, longitude) = match centre {
            Some(c) => (c.latitude, c.longitude),
            None => (config.latitude, config.longitude),
        };
        Self {
            latitude,
            longitude,
            latitude_delta: config.latitude_delta,
            longitude_delta: config.longitude_delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVariant {
    /// Live fix.
    Active,
    /// Cached position only.
    Stale,
}

impl MarkerVariant {
    pub fn icon(self) -> &'static str {
        match self {
            MarkerVariant::Active => "my-location",
            MarkerVariant::Stale => "location-disabled",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MarkerVariant::Active => "#34A853",
            MarkerVariant::Stale => "#EA4335",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnMarker {
    pub coordinate: Coordinate,
    pub variant: MarkerVariant,
}

/// Overlay revealed when a report pin is tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub title: String,
    pub type_line: String,
    pub severity_line: String,
    pub time_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportMarker {
    pub id: String,
    pub coordinate: Coordinate,
    pub pin_color: &'static str,
    pub callout: Callout,
}

/// Feed condition shown over the map when there are no pins to explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedNotice {
    Loading,
    Unavailable(FeedErrorKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapBody {
    Map {
        region: MapRegion,
        own_marker: Option<OwnMarker>,
        report_markers: Vec<ReportMarker>,
        feed_notice: Option<FeedNotice>,
    },
    /// Location failure banner with a manual retry.
    LocationError { message: String, retry_label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// Label of the presence button: the state it switches to.
    pub toggle_label: String,
    pub toggle_icon: &'static str,
    pub history_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub presence: Presence,
    pub status_label: String,
    pub body: MapBody,
    pub controls: Controls,
}

impl RenderPlan {
    pub fn own_marker(&self) -> Option<OwnMarker> {
        match &self.body {
            MapBody::Map { own_marker, .. } => *own_marker,
            MapBody::LocationError { .. } => None,
        }
    }

    pub fn report_markers(&self) -> &[ReportMarker] {
        match &self.body {
            MapBody::Map { report_markers, .. } => report_markers.as_slice(),
            MapBody::LocationError { .. } => &[],
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.body, MapBody::Map { .. })
    }
}

/// Everything the driver map depends on.
#[derive(Debug, Clone, Copy)]
pub struct ComposeInput<'a> {
    pub presence: Presence,
    pub location: Option<LocationSample>,
    pub location_error: Option<&'a LocationError>,
    pub feed: &'a FeedState<AccidentReport>,
    pub region: &'a RegionConfig,
}

pub fn own_marker(sample: Option<LocationSample>) -> Option<OwnMarker> {
    sample.map(|s| OwnMarker {
        coordinate: s.coordinate,
        variant: if s.is_live() {
            MarkerVariant::Active
        } else {
            MarkerVariant::Stale
        },
    })
}

pub fn report_marker(report: &AccidentReport) -> ReportMarker {
    ReportMarker {
        id: report.id.clone(),
        coordinate: report.location,
        pin_color: REPORT_PIN_COLOR,
        callout: Callout {
            title: CALLOUT_TITLE.to_string(),
            type_line: format!("Type: {}", report.details.type_label()),
            severity_line: format!("Severity: {}", report.details.severity_label()),
            time_line: format!("Time: {}", report.details.time_label()),
        },
    }
}

pub fn controls(presence: Presence) -> Controls {
    match presence {
        Presence::Offline => Controls {
            toggle_label: Presence::Online.to_string(),
            toggle_icon: "wifi",
            history_visible: false,
        },
        Presence::Online => Controls {
            toggle_label: Presence::Offline.to_string(),
            toggle_icon: "wifi-off",
            history_visible: true,
        },
    }
}

pub fn compose(input: ComposeInput<'_>) -> RenderPlan {
    let body = match input.location_error {
        Some(err) => MapBody::LocationError {
            message: err.to_string(),
            retry_label: RETRY_LABEL.to_string(),
        },
        None => {
            let feed_notice = match input.feed {
                FeedState::Loading => Some(FeedNotice::Loading),
                FeedState::Error(kind) => Some(FeedNotice::Unavailable(*kind)),
                FeedState::Empty | FeedState::Data(_) => None,
            };
            MapBody::Map {
                region: MapRegion::centred_on(
                    input.region,
                    input.location.map(|s| s.coordinate),
                ),
                own_marker: own_marker(input.location),
                report_markers: input.feed.items().iter().map(report_marker).collect(),
                feed_notice,
            }
        }
    };

    RenderPlan {
        presence: input.presence,
        status_label: input.presence.to_string(),
        body,
        controls: controls(input.presence),
    }
}
