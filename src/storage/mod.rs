//! Storage module.
//!
//! The remote document store is reached only through the [`ReportStore`]
//! trait, injected into every screen. [`InMemoryStore`] implements it fully
//! and serves as the test double.

pub mod memory;
pub mod models;
pub mod store;

pub use memory::*;
pub use models::*;
pub use store::*;
