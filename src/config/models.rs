//! Settings data model
//!
//! This module defines the persisted settings and the enums they carry.
//! Field names serialize in kebab-case so the on-disk keys match the
//! original settings schema (`icon-path`, `icon-size`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel region that hosts the status-area button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelRegion {
    /// Left box of the top panel
    Left,
    /// Center box of the top panel
    Center,
    /// Right box of the top panel
    Right,
}

impl PanelRegion {
    /// Stable lowercase name used on disk and on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Parse a region name; anything unknown is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for PanelRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which mouse button produced a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickSide {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
}

impl fmt::Display for ClickSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Effect bound to a mouse button, persisted as its integer id (0-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ClickAction {
    /// Toggle overview mode (show/hide)
    ToggleOverview,
    /// Show the application grid; hide the overview if it is already visible
    ShowAppsGrid,
    /// Minimize all visible windows on the workspace, or restore the ones
    /// previously minimized by this action
    ToggleHideWindows,
    /// Launch the system monitor, fire-and-forget
    OpenSystemMonitor,
    /// Launch the configured app command for this side
    LaunchApp,
    /// Run the configured custom shell command for this side
    RunCommand,
    /// Do nothing
    DoNothing,
    /// Open the configured website URL for this side
    OpenWebsite,
    /// Open the configured folder for this side
    OpenFolder,
}

impl From<ClickAction> for u8 {
    fn from(action: ClickAction) -> Self {
        match action {
            ClickAction::ToggleOverview => 0,
            ClickAction::ShowAppsGrid => 1,
            ClickAction::ToggleHideWindows => 2,
            ClickAction::OpenSystemMonitor => 3,
            ClickAction::LaunchApp => 4,
            ClickAction::RunCommand => 5,
            ClickAction::DoNothing => 6,
            ClickAction::OpenWebsite => 7,
            ClickAction::OpenFolder => 8,
        }
    }
}

impl TryFrom<u8> for ClickAction {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::ToggleOverview),
            1 => Ok(Self::ShowAppsGrid),
            2 => Ok(Self::ToggleHideWindows),
            3 => Ok(Self::OpenSystemMonitor),
            4 => Ok(Self::LaunchApp),
            5 => Ok(Self::RunCommand),
            6 => Ok(Self::DoNothing),
            7 => Ok(Self::OpenWebsite),
            8 => Ok(Self::OpenFolder),
            other => Err(format!("unknown click action id: {other}")),
        }
    }
}

/// Persisted settings store
///
/// Every field has a default so that partial or missing configuration files
/// load cleanly; unknown ids or malformed values fall back to the whole-file
/// default in [`crate::config::ConfigManager::load`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Path to the icon file; `~/` shorthand is resolved against the home directory
    pub icon_path: String,
    /// Icon size in pixels
    pub icon_size: u32,
    /// Horizontal padding around the icon in pixels
    pub horizontal_padding: u32,
    /// Panel region hosting the button
    pub icon_position: PanelRegion,
    /// Order of the button within its region (0 = leftmost)
    pub icon_order: i32,
    /// Action bound to the left mouse button
    pub left_click_action: ClickAction,
    /// Action bound to the right mouse button
    pub right_click_action: ClickAction,
    /// App command launched by the left-click `LaunchApp` action
    pub left_click_app: String,
    /// App command launched by the right-click `LaunchApp` action
    pub right_click_app: String,
    /// Shell command run by the left-click `RunCommand` action
    pub left_custom_command: String,
    /// Shell command run by the right-click `RunCommand` action
    pub right_custom_command: String,
    /// URL opened by the left-click `OpenWebsite` action
    pub left_custom_website: String,
    /// URL opened by the right-click `OpenWebsite` action
    pub right_custom_website: String,
    /// Folder opened by the left-click `OpenFolder` action
    pub left_custom_folder: String,
    /// Folder opened by the right-click `OpenFolder` action
    pub right_custom_folder: String,
    /// Minimum milliseconds between two accepted clicks (0 disables the gate)
    #[serde(rename = "click-cooldown")]
    pub click_cooldown_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            icon_path: String::new(),
            icon_size: 32,
            horizontal_padding: 4,
            icon_position: PanelRegion::Left,
            icon_order: 0,
            left_click_action: ClickAction::ToggleOverview,
            right_click_action: ClickAction::ToggleHideWindows,
            left_click_app: String::new(),
            right_click_app: String::new(),
            left_custom_command: String::new(),
            right_custom_command: String::new(),
            left_custom_website: String::new(),
            right_custom_website: String::new(),
            left_custom_folder: String::new(),
            right_custom_folder: String::new(),
            click_cooldown_ms: 300,
        }
    }
}

impl Settings {
    /// Action configured for the given click side
    pub fn click_action(&self, side: ClickSide) -> ClickAction {
        match side {
            ClickSide::Left => self.left_click_action,
            ClickSide::Right => self.right_click_action,
        }
    }

    /// App command configured for the given click side
    pub fn app_command(&self, side: ClickSide) -> &str {
        match side {
            ClickSide::Left => &self.left_click_app,
            ClickSide::Right => &self.right_click_app,
        }
    }

    /// Custom shell command configured for the given click side
    pub fn custom_command(&self, side: ClickSide) -> &str {
        match side {
            ClickSide::Left => &self.left_custom_command,
            ClickSide::Right => &self.right_custom_command,
        }
    }

    /// Website URL configured for the given click side
    pub fn website(&self, side: ClickSide) -> &str {
        match side {
            ClickSide::Left => &self.left_custom_website,
            ClickSide::Right => &self.right_custom_website,
        }
    }

    /// Folder path configured for the given click side
    pub fn folder(&self, side: ClickSide) -> &str {
        match side {
            ClickSide::Left => &self.left_custom_folder,
            ClickSide::Right => &self.right_custom_folder,
        }
    }
}
