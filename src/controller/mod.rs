//! Application controller module
//!
//! Central coordinator wiring the settings monitor and the shell's click
//! signals to the presenter and the dispatcher.
//!
//! # Event flow
//!
//! ```text
//! SettingsMonitor → SettingsEvent → AppController → Presenter (icon/position)
//! ShellBridge     → ClickEvent    → AppController → Dispatcher (actions)
//! ```
//!
//! Both channels drain on a single thread; every handler runs to completion
//! before the next event is looked at, so no two effects ever interleave.

pub mod app_controller;

pub use app_controller::AppController;
