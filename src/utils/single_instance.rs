//! Single instance enforcement
//!
//! Ensures only one applet instance runs at a time using an exclusively
//! flocked lock file in the runtime directory. The lock is released by the
//! kernel when the process exits, so stale lock files never block a restart.

use crate::error::{PanelLogoError, Result, StringError};
use crate::utils::paths;
use rustix::fs::{FlockOperation, flock};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

/// Single instance guard holding an exclusive file lock (released on drop)
pub struct SingleInstanceGuard {
    // Held open for the lifetime of the guard; closing the file releases the lock
    _file: File,
    path: PathBuf,
}

impl SingleInstanceGuard {
    /// Acquire the instance lock, returning an error if another instance holds it
    pub fn new() -> Result<Self> {
        Self::at(paths::runtime_dir().join("panel-logo.lock"))
    }

    /// Acquire the instance lock at a specific path
    pub fn at(path: PathBuf) -> Result<Self> {
        use tracing::{debug, error};

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        match flock(&file, FlockOperation::NonBlockingLockExclusive) {
            Ok(()) => {
                debug!("Instance lock acquired at {}", path.display());
                Ok(Self { _file: file, path })
            }
            Err(e) => {
                error!("Another instance of panel-logo is already running");
                Err(PanelLogoError::ConfigError(StringError::new(format!(
                    "another instance holds the lock at {}: {e}",
                    path.display()
                ))))
            }
        }
    }

    /// Path of the lock file backing this guard
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
