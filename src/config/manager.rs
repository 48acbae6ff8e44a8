//! Configuration manager for loading and saving settings
//!
//! Settings live in `$XDG_CONFIG_HOME/panel-logo/config.json`. Saves go
//! through a temporary file in the same directory followed by a rename so a
//! crash mid-write never corrupts the store.

use crate::config::models::Settings;
use crate::error::{PanelLogoError, Result, StringError};
use crate::utils::paths;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Path to the configuration file
    pub fn config_path() -> PathBuf {
        paths::config_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = paths::config_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Load settings from disk
    ///
    /// A missing or corrupt file degrades to default settings; only an
    /// unreadable file (permissions, IO) is an error.
    pub fn load() -> Result<Settings> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(Settings::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str(&json) {
            Ok(settings) => {
                info!("Configuration loaded successfully");
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(Settings::default())
            }
        }
    }

    /// Save settings to disk with an atomic write
    pub fn save(settings: &Settings) -> Result<()> {
        let config_path = Self::config_path();
        let config_dir = Self::ensure_config_dir()?;

        let json = serde_json::to_string_pretty(settings)?;

        // Write to a temp file in the same directory, then rename over the
        // target so readers never observe a half-written file
        let mut tmp = tempfile::NamedTempFile::new_in(&config_dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&config_path).map_err(|e| {
            PanelLogoError::ConfigError(StringError::new(format!(
                "failed to replace {}: {}",
                config_path.display(),
                e.error
            )))
        })?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
