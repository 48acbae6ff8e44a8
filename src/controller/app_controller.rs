//! Application controller implementation
//!
//! Runs the applet's single event loop: click events dispatch the configured
//! action, settings events swap the shared settings snapshot and re-run the
//! affected presentation updates.

use crate::config::models::Settings;
use crate::dispatcher::Dispatcher;
use crate::monitor::SettingsEvent;
use crate::presenter::Presenter;
use crate::shell::{ButtonId, ClickEvent};
use parking_lot::Mutex;
use std::sync::{Arc, mpsc};
use std::time::Duration;

/// How long the loop waits on the click channel before draining settings
/// events; keeps settings reactions prompt without busy-waiting
const CLICK_RECV_TIMEOUT: Duration = Duration::from_millis(100);

/// Central coordinator between monitors, presenter, and dispatcher
pub struct AppController {
    /// Current settings snapshot, shared with anything that reads live state
    settings: Arc<Mutex<Settings>>,
    presenter: Presenter,
    dispatcher: Dispatcher,
    /// Click receiver (taken when the event loop starts)
    click_receiver: Option<mpsc::Receiver<ClickEvent>>,
    /// Settings-event receiver (taken when the event loop starts)
    settings_receiver: Option<mpsc::Receiver<SettingsEvent>>,
}

impl AppController {
    /// Create a controller around its collaborators
    pub fn new(
        settings: Settings,
        presenter: Presenter,
        dispatcher: Dispatcher,
        click_receiver: mpsc::Receiver<ClickEvent>,
        settings_receiver: mpsc::Receiver<SettingsEvent>,
    ) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            presenter,
            dispatcher,
            click_receiver: Some(click_receiver),
            settings_receiver: Some(settings_receiver),
        }
    }

    /// Identifier of the status-area button this controller presents
    pub fn button_id(&self) -> ButtonId {
        self.presenter.button_id().clone()
    }

    /// Apply the initial icon and position from the loaded settings.
    /// Call once after construction, before entering the event loop.
    pub fn present_initial(&self) {
        use tracing::info;

        info!("Applying initial icon and position");
        let settings = self.settings.lock().clone();
        self.presenter.update_icon(&settings);
        self.presenter.update_position(&settings);
    }

    /// Run the event loop until the click channel disconnects.
    ///
    /// Uses a 100ms click-receive timeout so queued settings events are
    /// drained promptly even when nobody clicks.
    pub fn run(&mut self) {
        use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
        use tracing::{info, warn};

        let Some(click_receiver) = self.click_receiver.take() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };
        let Some(settings_receiver) = self.settings_receiver.take() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };

        info!("Entering main event loop (click events + settings events)");
        loop {
            match click_receiver.recv_timeout(CLICK_RECV_TIMEOUT) {
                Ok(event) => self.handle_click(event),
                Err(RecvTimeoutError::Timeout) => {
                    // Timeout is normal - fall through to the settings drain
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Click event channel disconnected. Exiting event loop.");
                    break;
                }
            }

            // Drain all queued settings events (non-blocking)
            loop {
                match settings_receiver.try_recv() {
                    Ok(event) => self.handle_settings_event(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        warn!("Settings event channel disconnected.");
                        // Keep handling clicks even without settings updates
                        break;
                    }
                }
            }
        }

        info!("Main event loop exited");
    }

    fn handle_click(&mut self, event: ClickEvent) {
        use tracing::debug;

        let settings = self.settings.lock().clone();
        let dispatched = self.dispatcher.handle_click(event.side, &settings);
        debug!(
            "{} click {}",
            event.side,
            if dispatched { "dispatched" } else { "dropped" }
        );
    }

    fn handle_settings_event(&mut self, event: SettingsEvent) {
        use tracing::debug;

        debug!(
            "Applying settings change (icon: {}, position: {})",
            event.delta.icon, event.delta.position
        );
        *self.settings.lock() = event.settings.clone();

        if event.delta.icon {
            self.presenter.update_icon(&event.settings);
        }
        if event.delta.position {
            self.presenter.update_position(&event.settings);
        }
    }
}
