//! Navigation module.
//!
//! The core never drives the navigation stack. It emits:
//! - Navigation intents (route name + parameter bag) for the host router
//! - External links (maps search) for the platform to open

pub mod external;
pub mod intent;

pub use external::*;
pub use intent::*;
