//! Configuration management module
//!
//! This module handles loading, saving, and managing the settings store.
//! Settings are stored in `$XDG_CONFIG_HOME/panel-logo/config.json` with
//! atomic writes to prevent corruption, and can be addressed by key name
//! (the preferences surface) or as the typed [`Settings`] struct (the
//! applet).

pub mod debounce;
pub mod keys;
pub mod manager;
pub mod models;

pub use debounce::DebouncedSaver;
pub use manager::ConfigManager;
pub use models::{ClickAction, ClickSide, PanelRegion, Settings};
