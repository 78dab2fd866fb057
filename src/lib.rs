//! RoadAid Core - live accident feed and driver presence
//!
//! This crate holds the client-side logic shared by the RoadAid driver and
//! civilian apps. The platform shell supplies rendering, navigation and
//! the platform SDKs; everything here is plain state and derivation:
//!
//! 1. **Feed** - one live query per screen, rebuilt from every snapshot
//! 2. **Presence** - the Offline/Online toggle gated on a location sample
//! 3. **Composition** - a render plan derived from feed, location and presence
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `storage` - store access trait, snapshots, in-memory store
//! - `extraction` - document field access, timestamp and report normalization
//! - `feed` - live query lifecycle and feed state
//! - `presence` - presence state machine, location tracking, location provider
//! - `compose` - driver map render plan
//! - `routing` - navigation intents and external links
//! - `validation` - report draft checks
//! - `screens` - mount/unmount lifecycles for each screen
//! - `model` - normalized report types and field vocabularies
//! - `config` - tunables with shipped defaults
//! - `logging` - structured logging with screen context

pub mod compose;
pub mod config;
pub mod extraction;
pub mod feed;
pub mod logging;
pub mod model;
pub mod presence;
pub mod routing;
pub mod screens;
pub mod storage;
pub mod validation;

pub use config::CoreConfig;
pub use feed::{FeedErrorKind, FeedState};
pub use model::{AccidentReport, Coordinate, RecordRow};
pub use screens::{CivilianHomeScreen, DriverHomeScreen, RecordsScreen, ReportForm};
pub use storage::{InMemoryStore, ReportStore};

/// Initialize the process logger. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
