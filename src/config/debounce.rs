//! Debounced settings persistence
//!
//! Rapid successive edits (interactive preferences editing) are coalesced
//! into a single disk write: a save happens only after a quiet period with
//! no further updates. Pending state is always flushed on shutdown, so the
//! last submitted settings are never lost.

use crate::config::manager::ConfigManager;
use crate::config::models::Settings;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Default quiet period before a submitted change is written out
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Coalesces rapid settings updates into single saves
pub struct DebouncedSaver {
    sender: Option<mpsc::Sender<Settings>>,
    thread: Option<JoinHandle<()>>,
}

impl DebouncedSaver {
    /// Create a saver with the given quiet period and start its writer thread
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel::<Settings>();

        let thread = thread::spawn(move || {
            loop {
                // Block until the first update of a burst arrives
                let Ok(mut latest) = receiver.recv() else {
                    break;
                };

                // Absorb further updates until the quiet period elapses
                loop {
                    match receiver.recv_timeout(delay) {
                        Ok(next) => latest = next,
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => {
                            // Shutdown mid-burst: flush what we have and exit
                            Self::write(&latest);
                            return;
                        }
                    }
                }

                Self::write(&latest);
            }
            debug!("Debounced saver thread exited");
        });

        Self {
            sender: Some(sender),
            thread: Some(thread),
        }
    }

    /// Submit a new settings snapshot; the write happens after the quiet period
    pub fn submit(&self, settings: Settings) {
        if let Some(sender) = &self.sender {
            if sender.send(settings).is_err() {
                warn!("Debounced saver thread is gone; settings update dropped");
            }
        }
    }

    /// Flush any pending settings and stop the writer thread
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        // Closing the channel wakes the thread, which flushes pending state
        drop(self.sender.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Debounced saver thread panicked");
            }
        }
    }

    fn write(settings: &Settings) {
        if let Err(e) = ConfigManager::save(settings) {
            warn!("Failed to save debounced settings: {}", e);
        }
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
