//! Utility modules
//!
//! Provides logging setup, XDG path resolution, desktop-entry command
//! extraction, and single instance enforcement.

pub mod desktop_entry;
pub mod logging;
pub mod paths;
pub mod single_instance;

pub use logging::init_logging;
pub use single_instance::SingleInstanceGuard;
