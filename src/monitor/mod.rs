//! Change monitoring module
//!
//! Background threads feed the controller through mpsc channels: the
//! settings monitor watches the configuration file and the shell bridge
//! forwards click signals. Every subscription made during startup returns a
//! [`MonitorHandle`]; [`Subscriptions`] collects them so one teardown call
//! releases everything and no callback survives shutdown.

pub mod settings_monitor;

pub use settings_monitor::{SettingsDelta, SettingsEvent, SettingsMonitor};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// Handle to a background monitor thread.
///
/// Stopping clears the running flag and joins the thread when it has already
/// finished; a thread blocked on its event source is detached instead and
/// winds down at its next wakeup. Either way no further events are produced
/// after `stop` returns, because producers check the flag before sending.
pub struct MonitorHandle {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Wrap a running flag and its thread
    pub fn new(running: Arc<AtomicBool>, thread: JoinHandle<()>) -> Self {
        Self {
            running,
            thread: Some(thread),
        }
    }

    /// Stop the monitor
    pub fn stop(mut self) {
        use tracing::debug;

        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.is_finished() {
                let _ = thread.join();
            } else {
                debug!("Monitor thread still blocked; detaching for wind-down");
            }
        }
    }
}

/// Every monitor registered during startup, released by a single call
#[derive(Default)]
pub struct Subscriptions {
    handles: Vec<MonitorHandle>,
}

impl Subscriptions {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a monitor handle for teardown
    pub fn register(&mut self, handle: MonitorHandle) {
        self.handles.push(handle);
    }

    /// Stop every registered monitor
    pub fn teardown(&mut self) {
        use tracing::info;

        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.stop();
        }
        info!("Released {count} monitor subscription(s)");
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn spawn_polling_thread(running: Arc<AtomicBool>) -> JoinHandle<()> {
        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(5));
            }
        })
    }

    #[test]
    fn test_stop_clears_running_flag() {
        let running = Arc::new(AtomicBool::new(true));
        let handle = MonitorHandle::new(Arc::clone(&running), spawn_polling_thread(Arc::clone(&running)));

        handle.stop();
        assert!(!running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_teardown_releases_all_handles() {
        let mut subscriptions = Subscriptions::new();
        let flags: Vec<Arc<AtomicBool>> =
            (0..3).map(|_| Arc::new(AtomicBool::new(true))).collect();

        for flag in &flags {
            subscriptions.register(MonitorHandle::new(
                Arc::clone(flag),
                spawn_polling_thread(Arc::clone(flag)),
            ));
        }

        subscriptions.teardown();
        for flag in &flags {
            assert!(!flag.load(Ordering::SeqCst));
        }
    }

    #[test]
    fn test_drop_tears_down() {
        let flag = Arc::new(AtomicBool::new(true));
        {
            let mut subscriptions = Subscriptions::new();
            subscriptions.register(MonitorHandle::new(
                Arc::clone(&flag),
                spawn_polling_thread(Arc::clone(&flag)),
            ));
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}
