//! Host shell capability handles and traits
//!
//! The desktop shell owns the panel, its containers, the windows, and the
//! overview; this crate never does. Everything shell-side is reached through
//! the opaque handles and narrow traits defined here, so the presentation
//! and dispatch logic stay testable against an in-memory double.
//!
//! # Architecture
//!
//! - [`PanelOps`]: the panel container operations (add/insert/remove the
//!   button, query and change its index and parent, replace its content)
//! - [`WindowOps`]: window enumeration and minimize control
//! - [`OverviewOps`]: overview visibility and the application grid
//! - [`Launcher`]: fire-and-forget command spawning
//! - [`bridge::ShellBridge`]: the production implementation over D-Bus
//! - [`mock::MockShell`]: the recording in-memory implementation for tests

pub mod bridge;
pub mod launcher;
pub mod mock;

pub use bridge::ShellBridge;
pub use launcher::CommandLauncher;

use crate::config::models::{ClickSide, PanelRegion};
use crate::error::Result;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Identifier of the status-area button owned by this applet instance.
///
/// The shell keys status-area insertions by this id, so two applet instances
/// never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ButtonId(String);

impl ButtonId {
    /// Create a fresh instance identifier
    pub fn new() -> Self {
        Self(format!("panel-logo-{}", Uuid::new_v4()))
    }

    /// The wire form of the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ButtonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a shell-owned window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Window type as reported by the window manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Regular application window
    Normal,
    /// Dialog window
    Dialog,
    /// Modal dialog window
    ModalDialog,
    /// Utility window (toolbox, palette)
    Utility,
    /// Anything else (docks, menus, splash screens, ...)
    Other,
}

impl WindowKind {
    /// Decode the wire representation used by the shell bridge
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Dialog,
            2 => Self::ModalDialog,
            3 => Self::Utility,
            _ => Self::Other,
        }
    }
}

/// Snapshot of one window as reported by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowInfo {
    /// Shell-owned window handle
    pub id: WindowId,
    /// Window type
    pub kind: WindowKind,
    /// Index of the workspace the window lives on
    pub workspace: i32,
    /// Whether the window is currently minimized
    pub minimized: bool,
    /// Whether the window manager reports the window as minimizable
    pub can_minimize: bool,
    /// Whether the window is marked "on all workspaces"
    pub on_all_workspaces: bool,
}

/// Icon handed to the panel: either a file on disk or a themed icon name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSpec {
    /// Load the icon from this file
    File(PathBuf),
    /// Resolve this name through the icon theme
    Themed(String),
}

/// Complete button content: icon plus its presentation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconContent {
    /// The icon to display
    pub icon: IconSpec,
    /// Icon size in pixels
    pub size: u32,
    /// Horizontal padding in pixels
    pub padding: u32,
}

/// A click on the status-area button, as delivered by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Which mouse button was pressed
    pub side: ClickSide,
}

/// Panel container operations
///
/// These are the only panel capabilities the presentation controller needs;
/// order values out of the container's bounds are clamped by the container
/// itself, not validated here.
pub trait PanelOps: Send + Sync {
    /// Register the button in the status area of `region` at `index`
    fn add_to_area(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()>;
    /// Region currently parenting the button, if any
    fn parent(&self, button: &ButtonId) -> Result<Option<PanelRegion>>;
    /// Index of the button within its current parent
    fn child_index(&self, button: &ButtonId) -> Result<i32>;
    /// Move the button to `index` within its current parent
    fn set_child_index(&self, button: &ButtonId, index: i32) -> Result<()>;
    /// Detach the button from its current parent
    fn remove(&self, button: &ButtonId) -> Result<()>;
    /// Insert the button into `region` at `index`
    fn insert(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()>;
    /// Replace all prior button content with exactly this icon
    fn set_content(&self, button: &ButtonId, content: &IconContent) -> Result<()>;
}

/// Window manager operations
pub trait WindowOps: Send + Sync {
    /// Enumerate every window the shell knows about
    fn list_windows(&self) -> Result<Vec<WindowInfo>>;
    /// Minimize a window
    fn minimize(&self, window: WindowId) -> Result<()>;
    /// Restore a minimized window
    fn unminimize(&self, window: WindowId) -> Result<()>;
    /// Index of the active workspace
    fn active_workspace(&self) -> Result<i32>;
}

/// Overview and application grid operations
pub trait OverviewOps: Send + Sync {
    /// Show the overview if hidden, hide it if shown
    fn toggle_overview(&self) -> Result<()>;
    /// Whether the overview is currently visible
    fn overview_visible(&self) -> Result<bool>;
    /// Hide the overview
    fn hide_overview(&self) -> Result<()>;
    /// Show the application grid
    fn show_applications(&self) -> Result<()>;
}

/// Fire-and-forget command spawning
///
/// There is no result channel: a successful return means the process was
/// handed off, nothing more.
pub trait Launcher: Send + Sync {
    /// Spawn `command_line` detached from the applet
    fn spawn(&self, command_line: &str) -> Result<()>;
}
