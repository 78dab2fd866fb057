//! Structured logging with screen context.
//!
//! Provides logging macros and utilities that include the screen id and,
//! where one is open, the subscription id in every log message.

pub mod structured;

pub use structured::*;
