//! Civilian home: own position, safety guide, and the report entry point.

use std::sync::Arc;

use crate::config::CoreConfig;
use crate::logging::structured::LogContext;
use crate::model::Coordinate;
use crate::presence::{LocationError, LocationProvider, Prompt};
use crate::routing::{NavigationIntent, NavigationParams};

use super::session::{AcquireMode, LocationSession};

const DEFAULT_USER_NAME: &str = "User";

fn location_required() -> Prompt {
    Prompt::new(
        "Location Required",
        "Please enable location services to use this app.",
    )
}

pub struct CivilianHomeScreen {
    ctx: LogContext,
    config: CoreConfig,
    user_name: String,
    location: LocationSession,
    prompted: bool,
    mounted: bool,
}

impl CivilianHomeScreen {
    /// Mount with the route params the login flow passed (`userName`).
    pub fn mount(
        locator: Arc<dyn LocationProvider>,
        params: &NavigationParams,
        config: CoreConfig,
    ) -> Self {
        let ctx = LogContext::for_screen("civilian-home");
        crate::log_info!(ctx, "SCREEN_MOUNTED");

        let user_name = params
            .get("userName")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_USER_NAME)
            .to_string();

        let location = LocationSession::new(locator, &ctx);
        location.acquire(AcquireMode::LiveOnly);

        Self {
            ctx,
            config,
            user_name,
            location,
            prompted: false,
            mounted: true,
        }
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}!", self.user_name)
    }

    pub fn avatar_initial(&self) -> char {
        self.user_name.chars().next().unwrap_or('U')
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location.coordinate()
    }

    /// Last location failure, whether refused up front or by the fix.
    pub fn location_error(&self) -> Option<LocationError> {
        self.location.error()
    }

    /// The permission alert, handed out once per mount. Covers a denial at
    /// the permission request and one reported by the position request.
    pub fn take_prompt(&mut self) -> Option<Prompt> {
        if self.prompted || self.location_error() != Some(LocationError::PermissionDenied) {
            return None;
        }
        self.prompted = true;
        Some(location_required())
    }

    pub fn safety_guide_intent(&self) -> NavigationIntent {
        NavigationIntent::push(&self.config.routes.safety_guide)
    }

    /// Open the report form, carrying the current position when known.
    pub fn report_intent(&self) -> NavigationIntent {
        let intent = NavigationIntent::push(&self.config.routes.report);
        match self.location() {
            Some(c) => intent
                .with_param("lat", &c.latitude.to_string())
                .with_param("lng", &c.longitude.to_string()),
            None => intent,
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.location.close();
        crate::log_info!(self.ctx, "SCREEN_UNMOUNTED");
    }
}

impl Drop for CivilianHomeScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
