//! Driver presence and device location.
//!
//! - `state` - the Offline/Online toggle and its location precondition
//! - `location` - the single current location sample (live beats cached)
//! - `provider` - the device location interface and a host-driven provider

pub mod location;
pub mod provider;
pub mod state;

pub use location::*;
pub use provider::*;
pub use state::*;
