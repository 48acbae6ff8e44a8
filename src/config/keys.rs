//! By-name access to settings keys
//!
//! The preferences surface addresses settings by their on-disk key names.
//! Setters validate values against the same bounds the preferences dialog
//! enforces (icon size 16-128, padding 0-48, order -1-9, cooldown 0-5000,
//! action ids 0-8).

use crate::config::models::{ClickAction, PanelRegion, Settings};
use thiserror::Error;

/// Every addressable settings key, in display order
pub const ALL_KEYS: &[&str] = &[
    "icon-path",
    "icon-size",
    "horizontal-padding",
    "icon-position",
    "icon-order",
    "left-click-action",
    "right-click-action",
    "left-click-app",
    "right-click-app",
    "left-custom-command",
    "right-custom-command",
    "left-custom-website",
    "right-custom-website",
    "left-custom-folder",
    "right-custom-folder",
    "click-cooldown",
];

/// Error produced by by-name settings access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsKeyError {
    /// The key does not name a setting
    #[error("unknown settings key: {0}")]
    UnknownKey(String),
    /// The value failed validation for its key
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Key the value was destined for
        key: String,
        /// Human-readable rejection reason
        reason: String,
    },
}

/// Read a setting by key name, rendered as a string
pub fn get(settings: &Settings, key: &str) -> Result<String, SettingsKeyError> {
    let value = match key {
        "icon-path" => settings.icon_path.clone(),
        "icon-size" => settings.icon_size.to_string(),
        "horizontal-padding" => settings.horizontal_padding.to_string(),
        "icon-position" => settings.icon_position.to_string(),
        "icon-order" => settings.icon_order.to_string(),
        "left-click-action" => u8::from(settings.left_click_action).to_string(),
        "right-click-action" => u8::from(settings.right_click_action).to_string(),
        "left-click-app" => settings.left_click_app.clone(),
        "right-click-app" => settings.right_click_app.clone(),
        "left-custom-command" => settings.left_custom_command.clone(),
        "right-custom-command" => settings.right_custom_command.clone(),
        "left-custom-website" => settings.left_custom_website.clone(),
        "right-custom-website" => settings.right_custom_website.clone(),
        "left-custom-folder" => settings.left_custom_folder.clone(),
        "right-custom-folder" => settings.right_custom_folder.clone(),
        "click-cooldown" => settings.click_cooldown_ms.to_string(),
        other => return Err(SettingsKeyError::UnknownKey(other.to_string())),
    };
    Ok(value)
}

/// Write a setting by key name, validating the value
pub fn set(settings: &mut Settings, key: &str, value: &str) -> Result<(), SettingsKeyError> {
    match key {
        "icon-path" => settings.icon_path = value.to_string(),
        "icon-size" => settings.icon_size = parse_ranged(key, value, 16, 128)?,
        "horizontal-padding" => settings.horizontal_padding = parse_ranged(key, value, 0, 48)?,
        "icon-position" => {
            settings.icon_position = PanelRegion::parse(value).ok_or_else(|| invalid(
                key,
                "expected one of left, center, right",
            ))?;
        }
        "icon-order" => settings.icon_order = parse_ranged(key, value, -1, 9)?,
        "left-click-action" => settings.left_click_action = parse_action(key, value)?,
        "right-click-action" => settings.right_click_action = parse_action(key, value)?,
        "left-click-app" => settings.left_click_app = value.to_string(),
        "right-click-app" => settings.right_click_app = value.to_string(),
        "left-custom-command" => settings.left_custom_command = value.to_string(),
        "right-custom-command" => settings.right_custom_command = value.to_string(),
        "left-custom-website" => settings.left_custom_website = value.to_string(),
        "right-custom-website" => settings.right_custom_website = value.to_string(),
        "left-custom-folder" => settings.left_custom_folder = value.to_string(),
        "right-custom-folder" => settings.right_custom_folder = value.to_string(),
        "click-cooldown" => settings.click_cooldown_ms = parse_ranged(key, value, 0, 5000)?,
        other => return Err(SettingsKeyError::UnknownKey(other.to_string())),
    }
    Ok(())
}

/// Reset a single key (or every key when `key` is `None`) to its default
pub fn reset(settings: &mut Settings, key: Option<&str>) -> Result<(), SettingsKeyError> {
    let Some(key) = key else {
        *settings = Settings::default();
        return Ok(());
    };

    let defaults = Settings::default();
    let default_value = get(&defaults, key)?;
    set(settings, key, &default_value)
}

fn invalid(key: &str, reason: impl Into<String>) -> SettingsKeyError {
    SettingsKeyError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_ranged<T>(key: &str, value: &str, min: T, max: T) -> Result<T, SettingsKeyError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let parsed: T = value
        .parse()
        .map_err(|_| invalid(key, format!("expected an integer, got {value:?}")))?;
    if parsed < min || parsed > max {
        return Err(invalid(key, format!("{parsed} is outside {min}..={max}")));
    }
    Ok(parsed)
}

fn parse_action(key: &str, value: &str) -> Result<ClickAction, SettingsKeyError> {
    let id: u8 = value
        .parse()
        .map_err(|_| invalid(key, format!("expected an action id 0-8, got {value:?}")))?;
    ClickAction::try_from(id).map_err(|e| invalid(key, e))
}
