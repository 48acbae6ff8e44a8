//! Shared test utilities for `panel-logo` unit tests.
//!
//! This module provides common test infrastructure used across multiple test
//! modules and the integration tests: temporary directories and an RAII
//! guard for redirecting the XDG/home environment variables.

use std::ffi::OsString;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex serializing tests that modify environment variables.
/// This prevents race conditions when multiple tests run in parallel and try
/// to point `XDG_CONFIG_HOME` (or `HOME`) at different paths.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that sets environment variables for a test scope and restores
/// the original values when dropped.
///
/// # Safety Considerations
///
/// This guard uses `std::env::set_var` and `std::env::remove_var`, which are
/// unsafe because they can race with other threads reading the environment.
///
/// **Safety Invariants:**
/// 1. Each test gets its own unique `TempDir`, so parallel tests would write
///    to different paths even if they overlapped
/// 2. The `ENV_LOCK` mutex ensures tests touch the environment serially; a
///    guard holds the lock for its whole lifetime
/// 3. The guard is RAII-based and restores the original values on drop,
///    preventing environment pollution between tests
/// 4. All variables for one test are taken through a single guard, so the
///    lock is never acquired re-entrantly
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<OsString>)>,
    // Held for the lifetime of this struct to ensure exclusive access to the
    // environment across parallel tests
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables with documented safety invariants"
)]
impl EnvGuard {
    /// Set every `(key, value)` pair, remembering the prior values.
    pub fn set(pairs: &[(&'static str, &str)]) -> Self {
        // A panicking test must not poison the lock for the rest of the suite
        let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut saved = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            saved.push((*key, std::env::var_os(key)));
            // SAFETY: serialized by ENV_LOCK; restored on drop. See the
            // struct-level documentation for the full invariants.
            unsafe {
                std::env::set_var(key, value);
            }
        }
        Self { saved, _lock: lock }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables with documented safety invariants"
)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain(..) {
            // SAFETY: still holding ENV_LOCK; restoring the prior state.
            unsafe {
                match original {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
