//! Feed context management.
//!
//! Identifies one live query for logging and state tracking.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one live query opened by a screen.
#[derive(Debug, Clone)]
pub struct FeedContext {
    pub feed_id: String,
    pub collection: String,
    pub opened_at: DateTime<Utc>,
    screen: LogContext,
}

impl FeedContext {
    pub fn new(screen: &LogContext, collection: &str) -> Self {
        let feed_id = format!("feed-{}", &Uuid::new_v4().simple().to_string()[..8]);

        Self {
            feed_id,
            collection: collection.to_string(),
            opened_at: Utc::now(),
            screen: screen.clone(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        self.screen.with_subscription(&self.feed_id)
    }
}
