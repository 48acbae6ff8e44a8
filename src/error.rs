//! Error types for `panel-logo`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `panel-logo`
#[derive(Debug, Error)]
pub enum PanelLogoError {
    /// Failed to load or validate an icon file
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to load icon: {0}")]
    IconLoadFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A panel or overview operation on the shell failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Shell API error: {0}")]
    ShellApiError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A window enumeration or minimize/unminimize operation failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("Window control failed: {0}")]
    WindowControlFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Failed to spawn a configured command
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to spawn command: {0}")]
    SpawnFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The shell-side companion interface is too old for this build
    #[error("Unsupported shell interface version {found}, need at least {required}")]
    UnsupportedShellVersion {
        /// Version reported by the shell interface
        found: u32,
        /// Minimum version this build can talk to
        required: u32,
    },

    /// D-Bus error from the shell bridge
    #[error("D-Bus error: {0}")]
    BusError(#[from] zbus::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `panel-logo` operations
pub type Result<T> = std::result::Result<T, PanelLogoError>;

/// Convert an error to a user-friendly message
///
/// Takes a `PanelLogoError` and returns a message suitable for showing to
/// end users when startup fails (runtime failures are logged and degraded
/// instead of surfaced).
pub fn get_user_friendly_error(error: &PanelLogoError) -> String {
    match error {
        PanelLogoError::IconLoadFailed(_) => "Unable to load the configured icon.\n\n\
             A themed fallback icon will be shown instead.\n\
             Check the icon-path setting points at an image file."
            .to_string(),
        PanelLogoError::ShellApiError(_) | PanelLogoError::BusError(_) => {
            "Unable to talk to the desktop shell.\n\n\
             Please ensure:\n\
             - The panel-logo shell extension is installed and enabled\n\
             - You are running inside a desktop session with a session bus"
                .to_string()
        }
        PanelLogoError::WindowControlFailed(_) => "Failed to query or control windows.\n\n\
             The hide/restore action may not work correctly.\n\
             Try disabling and re-enabling the extension."
            .to_string(),
        PanelLogoError::SpawnFailed(e) => {
            format!(
                "Failed to launch the configured command:\n\n{e}\n\n\
                 Check the command exists and is executable."
            )
        }
        PanelLogoError::ConfigError(_) => "Failed to load or save the configuration.\n\n\
             Your settings may not persist.\n\
             Check that you have write permissions to:\n\
             ~/.config/panel-logo"
            .to_string(),
        PanelLogoError::UnsupportedShellVersion { found, required } => {
            format!(
                "The shell-side interface is version {found}, but this build \
                 requires at least version {required}.\n\n\
                 Please update the panel-logo shell extension."
            )
        }
        PanelLogoError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        PanelLogoError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = PanelLogoError::UnsupportedShellVersion {
            found: 0,
            required: 1,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported shell interface version 0, need at least 1"
        );
    }

    #[test]
    fn test_user_friendly_messages() {
        let error = PanelLogoError::ConfigError(StringError::new("disk full"));
        let message = get_user_friendly_error(&error);
        assert!(message.contains("panel-logo"));
        assert!(message.contains("write permissions"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: PanelLogoError = io_error.into();
        assert!(matches!(error, PanelLogoError::IoError(_)));
    }

    #[test]
    fn test_spawn_failed_preserves_source() {
        let error = PanelLogoError::SpawnFailed(StringError::new("no such file"));
        assert_eq!(error.to_string(), "Failed to spawn command: no such file");
        let message = get_user_friendly_error(&error);
        assert!(message.contains("no such file"));
    }
}
