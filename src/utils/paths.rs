//! Filesystem locations and home-relative path display
//!
//! Resolves the XDG base directories the application writes under and
//! provides the `~` shorthand conversions shared by the presenter and the
//! preferences surface.

use std::path::{Path, PathBuf};

/// Directory name used under every base directory
const APP_DIR: &str = "panel-logo";

/// The user's home directory, from `$HOME` (falls back to `.`)
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Configuration directory: `$XDG_CONFIG_HOME/panel-logo` or `~/.config/panel-logo`
pub fn config_dir() -> PathBuf {
    base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// State directory for logs: `$XDG_STATE_HOME/panel-logo` or `~/.local/state/panel-logo`
pub fn state_dir() -> PathBuf {
    base_dir("XDG_STATE_HOME", &[".local", "state"]).join(APP_DIR)
}

/// Runtime directory for the instance lock: `$XDG_RUNTIME_DIR` or the temp dir
pub fn runtime_dir() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|v| !v.is_empty())
        .map_or_else(std::env::temp_dir, PathBuf::from)
}

fn base_dir(env_var: &str, home_relative: &[&str]) -> PathBuf {
    if let Some(dir) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let mut dir = home_dir();
    for part in home_relative {
        dir.push(part);
    }
    dir
}

/// Convert an absolute path to its `~` display form when it lies under `home`
pub fn display_path(path: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    if let Some(rest) = path.strip_prefix(home.as_ref()) {
        if rest.starts_with('/') {
            return format!("~{rest}");
        }
    }
    path.to_string()
}

/// Expand a `~`-prefixed display path to its absolute form
pub fn absolute_path(path: &str, home: &Path) -> String {
    if path == "~" {
        return home.to_string_lossy().into_owned();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return home.join(rest).to_string_lossy().into_owned();
    }
    path.to_string()
}
