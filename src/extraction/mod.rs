//! Record extraction module.
//!
//! Turns raw store documents into normalized reports: field access by
//! dot-path, timestamp resolution, and the coordinate filtering policy.

pub mod json_path;
pub mod report;
pub mod timestamp;

pub use json_path::*;
pub use report::*;
pub use timestamp::*;
