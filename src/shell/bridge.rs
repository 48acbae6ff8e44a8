//! D-Bus bridge to the shell-side companion interface
//!
//! The shell half of the extension exports
//! `org.gnome.Shell.Extensions.PanelLogo` on the session bus: panel child
//! manipulation, window enumeration and minimize control, overview control,
//! a `ButtonPressed` signal, and an `ApiVersion` property. This module is
//! the applet-side client. It is deliberately thin; every method maps 1:1
//! onto one host operation and no policy lives here.
//!
//! The blocking zbus API is used throughout: every call site already runs on
//! a dedicated thread (the controller loop or a monitor thread) and handlers
//! run to completion, so an async runtime would buy nothing.

use crate::config::models::{ClickSide, PanelRegion};
use crate::error::{PanelLogoError, Result, StringError};
use crate::monitor::MonitorHandle;
use crate::shell::{
    ButtonId, ClickEvent, IconContent, IconSpec, OverviewOps, PanelOps, WindowId, WindowInfo,
    WindowKind, WindowOps,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use zbus::blocking::Connection;
use zbus::proxy;

/// Minimum shell interface version this build can talk to
pub const MIN_API_VERSION: u32 = 1;

/// Wire form of one window: (id, kind, workspace, minimized, can_minimize,
/// on_all_workspaces)
type WireWindow = (u64, u32, i32, bool, bool, bool);

#[proxy(
    interface = "org.gnome.Shell.Extensions.PanelLogo",
    default_service = "org.gnome.Shell",
    default_path = "/org/gnome/Shell/Extensions/PanelLogo"
)]
trait PanelLogoShell {
    fn add_button(&self, id: &str, region: &str, index: i32) -> zbus::Result<()>;

    fn button_parent(&self, id: &str) -> zbus::Result<String>;

    fn button_index(&self, id: &str) -> zbus::Result<i32>;

    fn set_button_index(&self, id: &str, index: i32) -> zbus::Result<()>;

    fn remove_button(&self, id: &str) -> zbus::Result<()>;

    fn insert_button(&self, id: &str, region: &str, index: i32) -> zbus::Result<()>;

    fn set_button_icon(
        &self,
        id: &str,
        kind: &str,
        source: &str,
        size: u32,
        padding: u32,
    ) -> zbus::Result<()>;

    fn list_windows(&self) -> zbus::Result<Vec<WireWindow>>;

    fn minimize_window(&self, id: u64) -> zbus::Result<()>;

    fn unminimize_window(&self, id: u64) -> zbus::Result<()>;

    fn active_workspace(&self) -> zbus::Result<i32>;

    fn toggle_overview(&self) -> zbus::Result<()>;

    fn hide_overview(&self) -> zbus::Result<()>;

    fn show_applications(&self) -> zbus::Result<()>;

    #[zbus(property)]
    fn overview_active(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn api_version(&self) -> zbus::Result<u32>;
}

/// Production shell adapter over the session bus
pub struct ShellBridge {
    connection: Connection,
    proxy: PanelLogoShellProxyBlocking<'static>,
}

impl ShellBridge {
    /// Connect to the session bus and bind the companion interface
    pub fn connect() -> Result<Self> {
        use tracing::info;

        let connection = Connection::session()?;
        let proxy = PanelLogoShellProxyBlocking::new(&connection)?;
        info!("Connected to the shell companion interface");
        Ok(Self { connection, proxy })
    }

    /// Check the shell interface version against [`MIN_API_VERSION`]
    pub fn verify_api_version(&self) -> Result<u32> {
        let found = self.proxy.api_version()?;
        if found < MIN_API_VERSION {
            return Err(PanelLogoError::UnsupportedShellVersion {
                found,
                required: MIN_API_VERSION,
            });
        }
        Ok(found)
    }

    /// Forward `ButtonPressed` signals for `button` into `sender`.
    ///
    /// Runs on a background thread; middle clicks and signals for other
    /// instances are dropped. The thread winds down when the receiving end
    /// is dropped or the returned handle is stopped.
    pub fn subscribe_clicks(
        &self,
        button: &ButtonId,
        sender: mpsc::SyncSender<ClickEvent>,
    ) -> Result<MonitorHandle> {
        use tracing::{debug, warn};

        let connection = self.connection.clone();
        let button = button.clone();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::spawn(move || {
            let proxy = match PanelLogoShellProxyBlocking::new(&connection) {
                Ok(proxy) => proxy,
                Err(e) => {
                    warn!("Click subscription failed to bind the interface: {e}");
                    return;
                }
            };
            let signals = match proxy.inner().receive_signal("ButtonPressed") {
                Ok(signals) => signals,
                Err(e) => {
                    warn!("Click subscription failed: {e}");
                    return;
                }
            };

            for message in signals {
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                let (id, raw_button): (String, u32) = match message.body().deserialize() {
                    Ok(args) => args,
                    Err(e) => {
                        warn!("Malformed ButtonPressed signal: {e}");
                        continue;
                    }
                };
                if id != button.as_str() {
                    continue;
                }
                let Some(side) = click_side(raw_button) else {
                    continue;
                };
                if sender.send(ClickEvent { side }).is_err() {
                    // Receiver gone, the applet is shutting down
                    break;
                }
            }
            debug!("Click signal thread exited");
        });

        Ok(MonitorHandle::new(running, thread))
    }
}

/// Map an X11-style button number to a click side; anything else is ignored
fn click_side(raw_button: u32) -> Option<ClickSide> {
    match raw_button {
        1 => Some(ClickSide::Left),
        3 => Some(ClickSide::Right),
        _ => None,
    }
}

fn window_from_wire(wire: WireWindow) -> WindowInfo {
    let (id, kind, workspace, minimized, can_minimize, on_all_workspaces) = wire;
    WindowInfo {
        id: WindowId(id),
        kind: WindowKind::from_raw(kind),
        workspace,
        minimized,
        can_minimize,
        on_all_workspaces,
    }
}

impl PanelOps for ShellBridge {
    fn add_to_area(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()> {
        self.proxy
            .add_button(button.as_str(), region.as_str(), index)?;
        Ok(())
    }

    fn parent(&self, button: &ButtonId) -> Result<Option<PanelRegion>> {
        let name = self.proxy.button_parent(button.as_str())?;
        if name.is_empty() {
            return Ok(None);
        }
        PanelRegion::parse(&name).map(Some).ok_or_else(|| {
            PanelLogoError::ShellApiError(StringError::new(format!(
                "shell reported unknown panel region: {name}"
            )))
        })
    }

    fn child_index(&self, button: &ButtonId) -> Result<i32> {
        Ok(self.proxy.button_index(button.as_str())?)
    }

    fn set_child_index(&self, button: &ButtonId, index: i32) -> Result<()> {
        self.proxy.set_button_index(button.as_str(), index)?;
        Ok(())
    }

    fn remove(&self, button: &ButtonId) -> Result<()> {
        self.proxy.remove_button(button.as_str())?;
        Ok(())
    }

    fn insert(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()> {
        self.proxy
            .insert_button(button.as_str(), region.as_str(), index)?;
        Ok(())
    }

    fn set_content(&self, button: &ButtonId, content: &IconContent) -> Result<()> {
        let (kind, source) = match &content.icon {
            IconSpec::File(path) => ("file", path.to_string_lossy().into_owned()),
            IconSpec::Themed(name) => ("themed", name.clone()),
        };
        self.proxy.set_button_icon(
            button.as_str(),
            kind,
            &source,
            content.size,
            content.padding,
        )?;
        Ok(())
    }
}

impl WindowOps for ShellBridge {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let wire = self.proxy.list_windows()?;
        Ok(wire.into_iter().map(window_from_wire).collect())
    }

    fn minimize(&self, window: WindowId) -> Result<()> {
        self.proxy.minimize_window(window.0)?;
        Ok(())
    }

    fn unminimize(&self, window: WindowId) -> Result<()> {
        self.proxy.unminimize_window(window.0)?;
        Ok(())
    }

    fn active_workspace(&self) -> Result<i32> {
        Ok(self.proxy.active_workspace()?)
    }
}

impl OverviewOps for ShellBridge {
    fn toggle_overview(&self) -> Result<()> {
        self.proxy.toggle_overview()?;
        Ok(())
    }

    fn overview_visible(&self) -> Result<bool> {
        Ok(self.proxy.overview_active()?)
    }

    fn hide_overview(&self) -> Result<()> {
        self.proxy.hide_overview()?;
        Ok(())
    }

    fn show_applications(&self) -> Result<()> {
        self.proxy.show_applications()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_side_mapping() {
        assert_eq!(click_side(1), Some(ClickSide::Left));
        assert_eq!(click_side(3), Some(ClickSide::Right));
        assert_eq!(click_side(2), None, "middle clicks are ignored");
        assert_eq!(click_side(0), None);
    }

    #[test]
    fn test_window_from_wire() {
        let info = window_from_wire((7, 2, 1, true, false, true));
        assert_eq!(info.id, WindowId(7));
        assert_eq!(info.kind, WindowKind::ModalDialog);
        assert_eq!(info.workspace, 1);
        assert!(info.minimized);
        assert!(!info.can_minimize);
        assert!(info.on_all_workspaces);
    }

    #[test]
    fn test_unknown_window_kind_maps_to_other() {
        let info = window_from_wire((1, 42, 0, false, true, false));
        assert_eq!(info.kind, WindowKind::Other);
    }
}
