//! Settings change monitoring
//!
//! Polls the configuration file at a fixed interval and reports changes to
//! the controller. Change detection is two-stage: the file's mtime gates the
//! (cheap) reload, and a field-by-field comparison gates the event, so
//! touching the file without changing it stays silent.
//!
//! Each event carries a [`SettingsDelta`] classifying which presentation
//! concern the change touches, mirroring the per-key change subscriptions of
//! the settings schema: `icon-path`/`icon-size`/`horizontal-padding` drive
//! the icon, `icon-position`/`icon-order` drive the position. Everything
//! else (click actions, commands, cooldown) is read live at click time and
//! needs no fan-out beyond the settings swap itself.

use crate::config::manager::ConfigManager;
use crate::config::models::Settings;
use crate::error::Result;
use crate::monitor::MonitorHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, SystemTime};

/// Which presentation concerns a settings change touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsDelta {
    /// Icon path, size, or padding changed
    pub icon: bool,
    /// Panel region or order changed
    pub position: bool,
}

impl SettingsDelta {
    /// Classify the difference between two settings snapshots
    pub fn between(old: &Settings, new: &Settings) -> Self {
        Self {
            icon: old.icon_path != new.icon_path
                || old.icon_size != new.icon_size
                || old.horizontal_padding != new.horizontal_padding,
            position: old.icon_position != new.icon_position
                || old.icon_order != new.icon_order,
        }
    }
}

/// A settings change: the new snapshot plus its classification
#[derive(Debug, Clone)]
pub struct SettingsEvent {
    /// The freshly loaded settings
    pub settings: Settings,
    /// What changed relative to the previous snapshot
    pub delta: SettingsDelta,
}

/// Background monitor for the configuration file
pub struct SettingsMonitor {
    interval: Duration,
    sender: mpsc::SyncSender<SettingsEvent>,
    last: Settings,
    last_modified: Option<SystemTime>,
}

impl SettingsMonitor {
    /// Create a monitor starting from the given settings snapshot
    pub fn new(
        initial: Settings,
        interval: Duration,
        sender: mpsc::SyncSender<SettingsEvent>,
    ) -> Self {
        Self {
            interval,
            sender,
            last: initial,
            last_modified: None,
        }
    }

    /// Start the monitoring thread
    pub fn start(mut self) -> MonitorHandle {
        use tracing::{debug, error};

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::spawn(move || {
            // Seed the mtime so the first poll doesn't re-report the
            // snapshot we started from
            self.last_modified = Self::current_mtime();

            while flag.load(Ordering::SeqCst) {
                if let Err(e) = self.poll() {
                    error!("Error polling settings file: {}", e);
                }
                thread::sleep(self.interval);
            }
            debug!("Settings monitor stopped");
        });

        MonitorHandle::new(running, thread)
    }

    fn current_mtime() -> Option<SystemTime> {
        std::fs::metadata(ConfigManager::config_path())
            .and_then(|m| m.modified())
            .ok()
    }

    /// Reload the file when its mtime moved and emit an event when the
    /// contents actually differ
    fn poll(&mut self) -> Result<()> {
        use tracing::{debug, info};

        let modified = Self::current_mtime();
        if modified == self.last_modified {
            return Ok(());
        }
        self.last_modified = modified;

        let settings = ConfigManager::load()?;
        if settings == self.last {
            debug!("Settings file rewritten without changes");
            return Ok(());
        }

        let delta = SettingsDelta::between(&self.last, &settings);
        info!(
            "Settings changed (icon: {}, position: {})",
            delta.icon, delta.position
        );
        self.last = settings.clone();

        if self.sender.send(SettingsEvent { settings, delta }).is_err() {
            debug!("Settings event receiver gone");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{ClickAction, PanelRegion};
    use crate::test_utils::{EnvGuard, create_test_dir};

    #[test]
    fn test_delta_icon_keys() {
        let old = Settings::default();

        let mut new = old.clone();
        new.icon_path = "/tmp/a.png".to_string();
        let delta = SettingsDelta::between(&old, &new);
        assert!(delta.icon);
        assert!(!delta.position);

        let mut new = old.clone();
        new.icon_size = 48;
        assert!(SettingsDelta::between(&old, &new).icon);

        let mut new = old.clone();
        new.horizontal_padding = 8;
        assert!(SettingsDelta::between(&old, &new).icon);
    }

    #[test]
    fn test_delta_position_keys() {
        let old = Settings::default();

        let mut new = old.clone();
        new.icon_position = PanelRegion::Center;
        let delta = SettingsDelta::between(&old, &new);
        assert!(delta.position);
        assert!(!delta.icon);

        let mut new = old.clone();
        new.icon_order = 5;
        assert!(SettingsDelta::between(&old, &new).position);
    }

    #[test]
    fn test_delta_other_keys_touch_neither() {
        let old = Settings::default();
        let mut new = old.clone();
        new.left_click_action = ClickAction::RunCommand;
        new.left_custom_command = "uptime".to_string();
        new.click_cooldown_ms = 1000;

        let delta = SettingsDelta::between(&old, &new);
        assert!(!delta.icon);
        assert!(!delta.position);
    }

    #[test]
    fn test_monitor_reports_file_change() {
        let temp_dir = create_test_dir();
        let _guard = EnvGuard::set(&[("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap())]);

        let initial = Settings::default();
        ConfigManager::save(&initial).unwrap();

        let (tx, rx) = mpsc::sync_channel(8);
        let handle =
            SettingsMonitor::new(initial.clone(), Duration::from_millis(20), tx).start();

        // Let the monitor seed its mtime before the write lands
        thread::sleep(Duration::from_millis(60));

        let mut changed = initial;
        changed.icon_size = 64;
        changed.icon_position = PanelRegion::Right;
        ConfigManager::save(&changed).unwrap();

        let event = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("expected a settings event");
        assert_eq!(event.settings, changed);
        assert!(event.delta.icon);
        assert!(event.delta.position);

        handle.stop();
    }

    #[test]
    fn test_monitor_silent_without_changes() {
        let temp_dir = create_test_dir();
        let _guard = EnvGuard::set(&[("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap())]);

        let initial = Settings::default();
        ConfigManager::save(&initial).unwrap();

        let (tx, rx) = mpsc::sync_channel(8);
        let handle =
            SettingsMonitor::new(initial.clone(), Duration::from_millis(20), tx).start();
        thread::sleep(Duration::from_millis(60));

        // Rewrite identical contents; the mtime moves but nothing changed
        ConfigManager::save(&initial).unwrap();

        assert!(
            rx.recv_timeout(Duration::from_millis(300)).is_err(),
            "no event expected for an unchanged rewrite"
        );

        handle.stop();
    }
}
