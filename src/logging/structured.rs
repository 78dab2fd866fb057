//! Structured logging utilities.
//!
//! Provides context-aware logging with screen_id and subscription id
//! included in every log message.

use std::fmt;

use uuid::Uuid;

/// Logging context for one mounted screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub screen_id: String,
    pub subscription_id: Option<String>,
}

impl LogContext {
    pub fn new(screen_id: &str) -> Self {
        Self {
            screen_id: screen_id.to_string(),
            subscription_id: None,
        }
    }

    /// Context for a freshly mounted screen: `<screen>-<8 hex chars>`.
    pub fn for_screen(screen: &str) -> Self {
        Self::new(&format!("{}-{}", screen, &Uuid::new_v4().simple().to_string()[..8]))
    }

    pub fn with_subscription(&self, subscription_id: &str) -> Self {
        Self {
            screen_id: self.screen_id.clone(),
            subscription_id: Some(subscription_id.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subscription_id {
            Some(sid) => write!(f, "[screen={}] [sub={}]", self.screen_id, sid),
            None => write!(f, "[screen={}]", self.screen_id),
        }
    }
}

/// Log one event line: `<ctx> EVENT key=value ...`.
///
/// The event must be a string literal; values are formatted with
/// `Display`.
#[macro_export]
macro_rules! log_event {
    ($level:expr, $ctx:expr, $event:literal $(, $key:ident = $value:expr)* $(,)?) => {
        log::log!(
            $level,
            concat!("{} ", $event $(, " ", stringify!($key), "={}")*),
            $ctx $(, $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Error, $($arg)+) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::log_event!(log::Level::Debug, $($arg)+) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("driver-home-1");
        assert_eq!(format!("{}", ctx), "[screen=driver-home-1]");

        let ctx_with_sub = ctx.with_subscription("sub-42");
        assert_eq!(
            format!("{}", ctx_with_sub),
            "[screen=driver-home-1] [sub=sub-42]"
        );
    }

    #[test]
    fn test_event_macros_accept_many_pairs() {
        let ctx = LogContext::new("driver-home-1").with_subscription("feed-1");
        crate::log_info!(ctx, "FEED_SNAPSHOT", docs = 3, kept = 2, dropped = 1);
        crate::log_warn!(ctx, "FEED_ERROR", error = "offline");
        crate::log_error!(ctx, "REPORT_SUBMIT_FAILED", error = "rejected",);
        crate::log_debug!(ctx, "FEED_CLOSED");
    }

    #[test]
    fn test_for_screen_prefix() {
        let ctx = LogContext::for_screen("records");
        assert!(ctx.screen_id.starts_with("records-"));
        assert_eq!(ctx.screen_id.len(), "records-".len() + 8);
        assert!(ctx.subscription_id.is_none());
    }
}
