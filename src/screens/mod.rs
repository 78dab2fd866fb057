//! Screen lifecycles.
//!
//! Each screen owns its live query and location request from mount to
//! unmount. Nothing is shared between screens; every mount starts fresh.

pub mod civilian_home;
pub mod driver_home;
pub mod records;
pub mod report_form;
pub mod session;

pub use civilian_home::*;
pub use driver_home::*;
pub use records::*;
pub use report_form::*;
pub use session::*;
