//! `panel-logo` - configurable status-area button for the desktop panel
//!
//! Startup wires the settings store, the shell bridge, and the two event
//! sources (click signals, settings-file changes) into the controller loop,
//! then runs until the shell side goes away.

use anyhow::{Context, Result};
use panel_logo::{
    config::ConfigManager,
    controller::AppController,
    dispatcher::Dispatcher,
    error::{PanelLogoError, get_user_friendly_error},
    monitor::{SettingsMonitor, Subscriptions},
    presenter::Presenter,
    shell::{CommandLauncher, Launcher, OverviewOps, PanelOps, ShellBridge, WindowOps},
    utils,
};
use std::sync::{Arc, mpsc};
use std::time::Duration;
use tracing::{error, info};

/// How often the settings file is polled for changes
const SETTINGS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Capacity of the click and settings event channels
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Main entry point for the applet
///
/// Performs initialization including logging, single-instance enforcement,
/// settings loading, shell bridge connection and version check, initial
/// presentation, and monitor startup, then runs the event loop.
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("panel-logo v{} starting...", env!("CARGO_PKG_VERSION"));

    // Enforce single instance - a second applet would fight over the same
    // button identity and settings file. Must happen before anything else.
    let _single_instance_guard = match utils::SingleInstanceGuard::new() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Single instance check failed: {}", e);
            eprintln!(
                "panel-logo is already running.\n\n\
                 Please close the existing instance before starting a new one."
            );
            return Err(e.into());
        }
    };

    info!("Single instance check passed");

    let settings = ConfigManager::load().context("Failed to load settings")?;
    info!("Settings loaded (position: {})", settings.icon_position);

    let bridge = match connect_bridge() {
        Ok(bridge) => bridge,
        Err(e) => {
            error!("Failed to connect to the shell: {:#}", e);
            report_startup_failure(&e);
            return Err(e);
        }
    };

    let presenter = Presenter::new(Arc::clone(&bridge) as Arc<dyn PanelOps>);
    let dispatcher = Dispatcher::new(
        Arc::clone(&bridge) as Arc<dyn WindowOps>,
        Arc::clone(&bridge) as Arc<dyn OverviewOps>,
        Arc::new(CommandLauncher) as Arc<dyn Launcher>,
    );

    let (click_tx, click_rx) = mpsc::sync_channel(EVENT_CHANNEL_CAPACITY);
    let (settings_tx, settings_rx) = mpsc::sync_channel(EVENT_CHANNEL_CAPACITY);

    let mut controller = AppController::new(
        settings.clone(),
        presenter,
        dispatcher,
        click_rx,
        settings_rx,
    );

    info!("Applying initial presentation");
    controller.present_initial();

    // Everything registered here is released by one teardown call below
    let mut subscriptions = Subscriptions::new();
    subscriptions.register(
        bridge
            .subscribe_clicks(&controller.button_id(), click_tx)
            .context("Failed to subscribe to click signals")?,
    );
    subscriptions
        .register(SettingsMonitor::new(settings, SETTINGS_POLL_INTERVAL, settings_tx).start());

    info!("Starting event loop");
    controller.run();

    subscriptions.teardown();
    info!("panel-logo shutting down");

    Ok(())
}

/// Connect the shell bridge and gate on its interface version
fn connect_bridge() -> Result<Arc<ShellBridge>> {
    let bridge = ShellBridge::connect().context("Failed to connect to the session bus")?;
    let version = bridge
        .verify_api_version()
        .context("Shell interface version check failed")?;
    info!("Shell companion interface bound (API version {version})");
    Ok(Arc::new(bridge))
}

/// Print a user-facing explanation for a startup failure
fn report_startup_failure(error: &anyhow::Error) {
    let message = if let Some(app_error) = error.downcast_ref::<PanelLogoError>() {
        get_user_friendly_error(app_error)
    } else {
        format!("{error:#}")
    };
    eprintln!("Failed to start panel-logo:\n\n{message}");
}
