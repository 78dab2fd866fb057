//! Live report feed.
//!
//! Owns exactly one live query per mounted screen and rebuilds the
//! screen's list from every snapshot:
//! - Subscription lifecycle with a liveness guard
//! - Full-snapshot normalization (no accumulation)
//! - Explicit loading / empty / error / data state

pub mod context;
pub mod subscriber;

pub use context::*;
pub use subscriber::*;
