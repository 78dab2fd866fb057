//! View composition.
//!
//! Derives what a screen draws from its current state. Pure: the same
//! inputs always give the same plan.

pub mod plan;

pub use plan::*;
