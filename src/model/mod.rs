//! Domain model.
//!
//! Normalized accident reports and the closed vocabularies the report form
//! offers. Stored string forms are kept byte-for-byte as the apps write them.

pub mod fields;
pub mod report;

pub use fields::*;
pub use report::*;
