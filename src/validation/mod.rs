//! Report validation module.
//!
//! Checks a civilian's report draft before anything is written to the
//! store.

pub mod draft;

pub use draft::*;
