//! Driver home: live accident map plus the presence toggle.

use std::sync::Arc;

use crate::compose::{compose, ComposeInput, RenderPlan};
use crate::config::CoreConfig;
use crate::feed::{FeedState, MapFeed};
use crate::logging::structured::LogContext;
use crate::model::AccidentReport;
use crate::presence::{
    LocationProvider, LocationSample, Presence, PresenceMachine, Prompt, ToggleOutcome,
};
use crate::routing::NavigationIntent;
use crate::storage::ReportStore;

use super::session::{AcquireMode, LocationSession};

pub struct DriverHomeScreen {
    ctx: LogContext,
    config: CoreConfig,
    feed: MapFeed,
    location: LocationSession,
    presence: PresenceMachine,
    mounted: bool,
}

impl DriverHomeScreen {
    /// Mount: open the report feed and start location acquisition.
    pub fn mount(
        store: &dyn ReportStore,
        locator: Arc<dyn LocationProvider>,
        config: CoreConfig,
    ) -> Self {
        let ctx = LogContext::for_screen("driver-home");
        crate::log_info!(ctx, "SCREEN_MOUNTED");

        let feed = MapFeed::open_map(store, &config.reports_collection, &ctx);
        let location = LocationSession::new(locator, &ctx);
        location.acquire(AcquireMode::CachedThenLive);

        Self {
            ctx,
            config,
            feed,
            location,
            presence: PresenceMachine::new(),
            mounted: true,
        }
    }

    /// The Online/Offline button. Returns the prompt to show when going
    /// online is refused.
    pub fn toggle_online(&mut self) -> Option<Prompt> {
        let has_location = self.location.sample().is_some();
        match self.presence.toggle(has_location) {
            ToggleOutcome::Changed(state) => {
                crate::log_info!(self.ctx, "PRESENCE_CHANGED", state = state);
                None
            }
            ToggleOutcome::Rejected(prompt) => {
                crate::log_warn!(self.ctx, "PRESENCE_REJECTED", reason = "no_location");
                Some(prompt)
            }
        }
    }

    /// The Records button; only present while online.
    pub fn open_history(&self) -> Option<NavigationIntent> {
        self.presence
            .state()
            .is_online()
            .then(|| NavigationIntent::push(&self.config.routes.history))
    }

    /// Retry action on the location error banner.
    pub fn retry_location(&self) {
        self.location.retry(AcquireMode::CachedThenLive);
    }

    pub fn render(&self) -> RenderPlan {
        let feed = self.feed.state();
        let error = self.location.error();
        compose(ComposeInput {
            presence: self.presence.state(),
            location: self.location.sample(),
            location_error: error.as_ref(),
            feed: &feed,
            region: &self.config.default_region,
        })
    }

    pub fn presence(&self) -> Presence {
        self.presence.state()
    }

    pub fn location(&self) -> Option<LocationSample> {
        self.location.sample()
    }

    pub fn reports(&self) -> Vec<AccidentReport> {
        self.feed.items()
    }

    pub fn feed_state(&self) -> FeedState<AccidentReport> {
        self.feed.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Close the feed and discard any in-flight location result.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.location.close();
        self.feed.close();
        crate::log_info!(self.ctx, "SCREEN_UNMOUNTED");
    }
}

impl Drop for DriverHomeScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::compose::MarkerVariant;
    use crate::model::Coordinate;
    use crate::presence::ManualLocationProvider;
    use crate::storage::InMemoryStore;

    fn mount(store: &InMemoryStore, provider: &Arc<ManualLocationProvider>) -> DriverHomeScreen {
        DriverHomeScreen::mount(store, provider.clone(), CoreConfig::default())
    }

    #[test]
    fn test_offline_without_location_prompts() {
        let store = InMemoryStore::new();
        let provider = Arc::new(ManualLocationProvider::granted());
        let mut screen = mount(&store, &provider);

        let prompt = screen.toggle_online();
        assert_eq!(prompt, Some(Prompt::location_required()));
        assert_eq!(screen.presence(), Presence::Offline);
        assert!(screen.open_history().is_none());
    }

    #[test]
    fn test_cached_location_allows_online() {
        let store = InMemoryStore::new();
        let provider = Arc::new(
            ManualLocationProvider::granted().with_last_known(Coordinate::new(8.0, 76.0)),
        );
        let mut screen = mount(&store, &provider);

        assert_eq!(screen.toggle_online(), None);
        assert_eq!(screen.presence(), Presence::Online);
        assert_eq!(
            screen.open_history(),
            Some(NavigationIntent::push("/accidentRecords"))
        );
        assert_eq!(
            screen.render().own_marker().map(|m| m.variant),
            Some(MarkerVariant::Stale)
        );
    }

    #[test]
    fn test_reports_render_as_markers() {
        let store = InMemoryStore::new();
        store.insert(
            "accidentReports",
            "r1",
            json!({"location": {"latitude": 8.9, "longitude": 76.6}, "accidentType": "Car"}),
        );
        let provider = Arc::new(ManualLocationProvider::granted());
        let screen = mount(&store, &provider);

        let plan = screen.render();
        assert_eq!(plan.report_markers().len(), 1);
        assert_eq!(plan.report_markers()[0].callout.type_line, "Type: Car");
    }

    #[test]
    fn test_permission_denied_banner_and_retry() {
        let store = InMemoryStore::new();
        let provider = Arc::new(ManualLocationProvider::denied());
        let screen = mount(&store, &provider);
        assert!(!screen.render().is_map());

        provider.set_permission(crate::presence::PermissionStatus::Granted);
        screen.retry_location();
        assert!(screen.render().is_map());
        provider.resolve(Ok(Coordinate::new(1.0, 1.0)));
        assert_eq!(
            screen.render().own_marker().map(|m| m.variant),
            Some(MarkerVariant::Active)
        );
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let store = InMemoryStore::new();
        let provider = Arc::new(ManualLocationProvider::granted());
        let mut screen = mount(&store, &provider);
        screen.unmount();
        screen.unmount();
        assert!(!screen.is_mounted());
        assert_eq!(store.listener_count(), 0);
    }
}
