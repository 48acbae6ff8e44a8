//! Click action dispatch
//!
//! Maps a configured action and a click side to its effect. The dispatcher
//! owns the only two pieces of mutable state in the applet: the last-click
//! timestamp backing the cooldown gate, and the hidden-windows record
//! backing the hide/restore toggle.
//!
//! # Toggle behavior
//!
//! The hide/restore action is a strict two-phase toggle. Hiding minimizes
//! every visible candidate window on the active workspace and records
//! exactly that set under the workspace index; restoring unminimizes only
//! the recorded windows that are still minimized, then clears the record.
//! It is never a blind "unminimize everything": windows that were already
//! minimized before the hide stay minimized after the restore.
//!
//! The record persists per-workspace until its restore; switching
//! workspaces neither clears nor transfers it. Stale handles (windows
//! closed while hidden) are skipped at restore time.
//!
//! # Failure semantics
//!
//! Spawn failures and window-API failures are logged and swallowed; an
//! enumeration failure leaves the hidden-windows record untouched. No click
//! can take the applet down.

use crate::config::models::{ClickAction, ClickSide, Settings};
use crate::error::Result;
use crate::shell::{Launcher, OverviewOps, WindowId, WindowInfo, WindowKind, WindowOps};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Command line launched by the system monitor action
pub const SYSTEM_MONITOR_COMMAND: &str = "gnome-system-monitor";

/// Executes configured click actions against the shell
pub struct Dispatcher {
    windows: Arc<dyn WindowOps>,
    overview: Arc<dyn OverviewOps>,
    launcher: Arc<dyn Launcher>,
    /// Windows minimized by the hide action, keyed by workspace index
    hidden: HashMap<i32, Vec<WindowId>>,
    /// Timestamp of the last accepted click; `None` until the first click
    last_click: Option<Instant>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty hidden-windows record
    pub fn new(
        windows: Arc<dyn WindowOps>,
        overview: Arc<dyn OverviewOps>,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        Self {
            windows,
            overview,
            launcher,
            hidden: HashMap::new(),
            last_click: None,
        }
    }

    /// Dispatch the action configured for `side`.
    ///
    /// Returns `false` when the click was dropped by the cooldown gate; the
    /// drop is total: no state changes and no action runs.
    pub fn handle_click(&mut self, side: ClickSide, settings: &Settings) -> bool {
        use tracing::debug;

        if !self.accept_click(settings.click_cooldown_ms) {
            debug!("Click on {side} dropped by cooldown gate");
            return false;
        }

        let action = settings.click_action(side);
        debug!("Dispatching {action:?} for {side} click");
        self.run_action(action, side, settings);
        true
    }

    /// Windows currently recorded as hidden for a workspace
    pub fn hidden_windows(&self, workspace: i32) -> Option<&[WindowId]> {
        self.hidden.get(&workspace).map(Vec::as_slice)
    }

    /// Cooldown gate: a click is accepted when no cooldown is configured or
    /// enough time has passed since the last accepted click
    fn accept_click(&mut self, cooldown_ms: u64) -> bool {
        if cooldown_ms > 0 {
            if let Some(last) = self.last_click {
                if last.elapsed() < Duration::from_millis(cooldown_ms) {
                    return false;
                }
            }
        }
        self.last_click = Some(Instant::now());
        true
    }

    fn run_action(&mut self, action: ClickAction, side: ClickSide, settings: &Settings) {
        use tracing::error;

        match action {
            ClickAction::ToggleOverview => {
                if let Err(e) = self.overview.toggle_overview() {
                    error!("Failed to toggle overview: {e}");
                }
            }
            ClickAction::ShowAppsGrid => self.show_apps_grid(),
            ClickAction::ToggleHideWindows => {
                if let Err(e) = self.toggle_hidden_windows() {
                    error!("Failed to toggle windows: {e}");
                }
            }
            ClickAction::OpenSystemMonitor => {
                if let Err(e) = self.launcher.spawn(SYSTEM_MONITOR_COMMAND) {
                    error!("Failed to launch system monitor: {e}");
                }
            }
            ClickAction::LaunchApp => {
                self.spawn_configured(settings.app_command(side), side, "app");
            }
            ClickAction::RunCommand => {
                self.spawn_configured(settings.custom_command(side), side, "custom command");
            }
            ClickAction::DoNothing => {}
            ClickAction::OpenWebsite => {
                Self::open_configured(settings.website(side), side, "website");
            }
            ClickAction::OpenFolder => {
                Self::open_configured(settings.folder(side), side, "folder");
            }
        }
    }

    /// Show the application grid, or leave the overview entirely when it is
    /// already up
    fn show_apps_grid(&self) {
        use tracing::error;

        match self.overview.overview_visible() {
            Ok(true) => {
                if let Err(e) = self.overview.hide_overview() {
                    error!("Failed to hide overview: {e}");
                }
            }
            Ok(false) => {
                if let Err(e) = self.overview.show_applications() {
                    error!("Failed to show application grid: {e}");
                }
            }
            Err(e) => error!("Failed to query overview visibility: {e}"),
        }
    }

    /// Spawn a per-side configured command; an empty setting is a silent no-op
    fn spawn_configured(&self, command: &str, side: ClickSide, what: &str) {
        use tracing::{debug, error};

        if command.is_empty() {
            debug!("No {what} configured for {side} click");
            return;
        }
        if let Err(e) = self.launcher.spawn(command) {
            error!("Failed to launch {what} on {side} click: {e}");
        }
    }

    /// Open a URL or folder with the default handler, detached; an empty
    /// setting is a silent no-op
    fn open_configured(target: &str, side: ClickSide, what: &str) {
        use tracing::{debug, error};

        if target.is_empty() {
            debug!("No {what} configured for {side} click");
            return;
        }
        if let Err(e) = open::that_detached(target) {
            error!("Failed to open {what} on {side} click: {e}");
        }
    }

    /// Two-phase hide/restore toggle over the active workspace.
    ///
    /// On error the hidden-windows record is left exactly as it was.
    fn toggle_hidden_windows(&mut self) -> Result<()> {
        use tracing::{debug, info, warn};

        let workspace = self.windows.active_workspace()?;
        let all = self.windows.list_windows()?;

        let candidates: Vec<&WindowInfo> = all
            .iter()
            .filter(|w| is_hide_candidate(w, workspace))
            .collect();
        if candidates.is_empty() {
            debug!("No hideable windows on workspace {workspace}");
            return Ok(());
        }

        let visible: Vec<WindowId> = candidates
            .iter()
            .filter(|w| !w.minimized)
            .map(|w| w.id)
            .collect();

        if !visible.is_empty() {
            // Hide phase: minimize everything visible, record exactly that set
            info!(
                "Hiding {} window(s) on workspace {workspace}",
                visible.len()
            );
            for id in &visible {
                if let Err(e) = self.windows.minimize(*id) {
                    warn!("Failed to minimize window {id}: {e}");
                }
            }
            self.hidden.insert(workspace, visible);
        } else if let Some(recorded) = self.hidden.remove(&workspace) {
            // Restore phase: unminimize only what we hid and is still minimized
            let minimized_now: HashSet<WindowId> = all
                .iter()
                .filter(|w| w.minimized)
                .map(|w| w.id)
                .collect();
            info!(
                "Restoring {} window(s) on workspace {workspace}",
                recorded.len()
            );
            for id in recorded {
                if !minimized_now.contains(&id) {
                    debug!("Window {id} gone or already restored, skipping");
                    continue;
                }
                if let Err(e) = self.windows.unminimize(id) {
                    warn!("Failed to restore window {id}: {e}");
                }
            }
        } else {
            debug!("All windows minimized but nothing recorded for workspace {workspace}");
        }

        Ok(())
    }
}

/// Whether a window participates in the hide/restore toggle: minimizable,
/// on the active workspace (or sticky), and of an ordinary window type
fn is_hide_candidate(window: &WindowInfo, active_workspace: i32) -> bool {
    if !window.can_minimize {
        return false;
    }
    if window.workspace != active_workspace && !window.on_all_workspaces {
        return false;
    }
    matches!(
        window.kind,
        WindowKind::Normal | WindowKind::Dialog | WindowKind::ModalDialog | WindowKind::Utility
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::mock::MockShell;
    use proptest::prelude::*;

    fn dispatcher_with(shell: &Arc<MockShell>) -> Dispatcher {
        Dispatcher::new(
            Arc::<MockShell>::clone(shell) as Arc<dyn WindowOps>,
            Arc::<MockShell>::clone(shell) as Arc<dyn OverviewOps>,
            Arc::<MockShell>::clone(shell) as Arc<dyn Launcher>,
        )
    }

    fn window(id: u64, kind: WindowKind, workspace: i32, minimized: bool) -> WindowInfo {
        WindowInfo {
            id: WindowId(id),
            kind,
            workspace,
            minimized,
            can_minimize: true,
            on_all_workspaces: false,
        }
    }

    fn settings_with_cooldown(cooldown_ms: u64) -> Settings {
        let mut settings = Settings::default();
        settings.click_cooldown_ms = cooldown_ms;
        settings
    }

    #[test]
    fn test_toggle_round_trip_restores_exactly_the_hidden_set() {
        let shell = Arc::new(MockShell::new());
        shell.add_window(window(1, WindowKind::Normal, 0, false));
        shell.add_window(window(2, WindowKind::Dialog, 0, false));
        // Minimized before the hide: must stay minimized after the restore
        shell.add_window(window(3, WindowKind::Normal, 0, true));

        let mut dispatcher = dispatcher_with(&shell);
        let settings = settings_with_cooldown(0);

        // First toggle hides the two visible windows
        dispatcher.handle_click(ClickSide::Right, &settings);
        assert!(shell.is_minimized(WindowId(1)));
        assert!(shell.is_minimized(WindowId(2)));
        assert_eq!(
            dispatcher.hidden_windows(0),
            Some(&[WindowId(1), WindowId(2)][..])
        );

        // Second toggle restores exactly those two, and clears the record
        dispatcher.handle_click(ClickSide::Right, &settings);
        assert!(!shell.is_minimized(WindowId(1)));
        assert!(!shell.is_minimized(WindowId(2)));
        assert!(
            shell.is_minimized(WindowId(3)),
            "a window minimized before the hide must not be restored"
        );
        assert_eq!(dispatcher.hidden_windows(0), None);
    }

    #[test]
    fn test_toggle_ignores_other_workspaces_and_includes_sticky() {
        let shell = Arc::new(MockShell::new());
        shell.set_active_workspace(1);
        shell.add_window(window(1, WindowKind::Normal, 1, false));
        shell.add_window(window(2, WindowKind::Normal, 0, false)); // other workspace
        let mut sticky = window(3, WindowKind::Normal, 0, false);
        sticky.on_all_workspaces = true;
        shell.add_window(sticky);

        let mut dispatcher = dispatcher_with(&shell);
        dispatcher.handle_click(ClickSide::Right, &settings_with_cooldown(0));

        assert!(shell.is_minimized(WindowId(1)));
        assert!(!shell.is_minimized(WindowId(2)));
        assert!(shell.is_minimized(WindowId(3)), "sticky windows participate");
        assert_eq!(
            dispatcher.hidden_windows(1),
            Some(&[WindowId(1), WindowId(3)][..])
        );
    }

    #[test]
    fn test_toggle_skips_ineligible_windows() {
        let shell = Arc::new(MockShell::new());
        let mut unminimizable = window(1, WindowKind::Normal, 0, false);
        unminimizable.can_minimize = false;
        shell.add_window(unminimizable);
        shell.add_window(window(2, WindowKind::Other, 0, false)); // dock-like

        let mut dispatcher = dispatcher_with(&shell);
        dispatcher.handle_click(ClickSide::Right, &settings_with_cooldown(0));

        assert!(!shell.is_minimized(WindowId(1)));
        assert!(!shell.is_minimized(WindowId(2)));
        assert_eq!(dispatcher.hidden_windows(0), None);
    }

    #[test]
    fn test_toggle_empty_candidate_set_leaves_record_unchanged() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        // Seed a record for another workspace
        dispatcher.hidden.insert(2, vec![WindowId(9)]);

        dispatcher.handle_click(ClickSide::Right, &settings_with_cooldown(0));

        assert_eq!(dispatcher.hidden_windows(2), Some(&[WindowId(9)][..]));
        assert_eq!(dispatcher.hidden_windows(0), None);
    }

    #[test]
    fn test_toggle_enumeration_failure_leaves_record_unchanged() {
        let shell = Arc::new(MockShell::new());
        shell.add_window(window(1, WindowKind::Normal, 0, false));
        let mut dispatcher = dispatcher_with(&shell);
        dispatcher.hidden.insert(0, vec![WindowId(5)]);

        shell.set_fail_list_windows(true);
        dispatcher.handle_click(ClickSide::Right, &settings_with_cooldown(0));

        assert_eq!(dispatcher.hidden_windows(0), Some(&[WindowId(5)][..]));
        assert!(!shell.is_minimized(WindowId(1)));
    }

    #[test]
    fn test_toggle_skips_closed_windows_on_restore() {
        let shell = Arc::new(MockShell::new());
        shell.add_window(window(1, WindowKind::Normal, 0, true));
        let mut dispatcher = dispatcher_with(&shell);
        // Record references a window that no longer exists plus a live one
        dispatcher.hidden.insert(0, vec![WindowId(99), WindowId(1)]);

        dispatcher.handle_click(ClickSide::Right, &settings_with_cooldown(0));

        assert!(!shell.is_minimized(WindowId(1)));
        assert_eq!(dispatcher.hidden_windows(0), None);
    }

    #[test]
    fn test_cooldown_drops_rapid_second_click() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let settings = settings_with_cooldown(300);

        assert!(dispatcher.handle_click(ClickSide::Left, &settings));
        std::thread::sleep(Duration::from_millis(100));
        assert!(!dispatcher.handle_click(ClickSide::Left, &settings));

        assert_eq!(shell.overview_toggles(), 1, "exactly one action dispatched");
    }

    #[test]
    fn test_cooldown_accepts_spaced_clicks() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let settings = settings_with_cooldown(300);

        assert!(dispatcher.handle_click(ClickSide::Left, &settings));
        std::thread::sleep(Duration::from_millis(400));
        assert!(dispatcher.handle_click(ClickSide::Left, &settings));

        assert_eq!(shell.overview_toggles(), 2);
    }

    #[test]
    fn test_cooldown_zero_disables_gate() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let settings = settings_with_cooldown(0);

        for _ in 0..5 {
            assert!(dispatcher.handle_click(ClickSide::Left, &settings));
        }
        assert_eq!(shell.overview_toggles(), 5);
    }

    #[test]
    fn test_do_nothing_has_no_observable_effect_beyond_cooldown() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let mut settings = settings_with_cooldown(300);
        settings.left_click_action = ClickAction::DoNothing;

        assert!(dispatcher.handle_click(ClickSide::Left, &settings));

        assert_eq!(shell.overview_toggles(), 0);
        assert_eq!(shell.spawned().len(), 0);
        assert!(shell.panel_calls().is_empty());
        assert!(dispatcher.hidden.is_empty());
        // The cooldown timestamp did advance: an immediate second click drops
        assert!(!dispatcher.handle_click(ClickSide::Left, &settings));
    }

    #[test]
    fn test_overview_toggle_action() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let settings = settings_with_cooldown(0);

        dispatcher.handle_click(ClickSide::Left, &settings);
        assert!(shell.overview_visible().unwrap());
        dispatcher.handle_click(ClickSide::Left, &settings);
        assert!(!shell.overview_visible().unwrap());
    }

    #[test]
    fn test_apps_grid_shows_or_hides() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let mut settings = settings_with_cooldown(0);
        settings.left_click_action = ClickAction::ShowAppsGrid;

        dispatcher.handle_click(ClickSide::Left, &settings);
        assert_eq!(shell.show_applications_calls(), 1);

        // Overview now visible: the same action leaves it instead
        dispatcher.handle_click(ClickSide::Left, &settings);
        assert_eq!(shell.hide_overview_calls(), 1);
        assert_eq!(shell.show_applications_calls(), 1);
    }

    #[test]
    fn test_system_monitor_action_spawns() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let mut settings = settings_with_cooldown(0);
        settings.right_click_action = ClickAction::OpenSystemMonitor;

        dispatcher.handle_click(ClickSide::Right, &settings);
        assert_eq!(shell.spawned(), vec![SYSTEM_MONITOR_COMMAND.to_string()]);
    }

    #[test]
    fn test_launch_app_uses_per_side_command() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let mut settings = settings_with_cooldown(0);
        settings.left_click_action = ClickAction::LaunchApp;
        settings.right_click_action = ClickAction::LaunchApp;
        settings.left_click_app = "firefox".to_string();
        // right-click-app left empty on purpose

        dispatcher.handle_click(ClickSide::Left, &settings);
        dispatcher.handle_click(ClickSide::Right, &settings);

        assert_eq!(
            shell.spawned(),
            vec!["firefox".to_string()],
            "an empty command is a silent no-op"
        );
    }

    #[test]
    fn test_custom_command_action() {
        let shell = Arc::new(MockShell::new());
        let mut dispatcher = dispatcher_with(&shell);
        let mut settings = settings_with_cooldown(0);
        settings.left_click_action = ClickAction::RunCommand;
        settings.left_custom_command = "systemctl suspend".to_string();

        dispatcher.handle_click(ClickSide::Left, &settings);
        assert_eq!(shell.spawned(), vec!["systemctl suspend".to_string()]);
    }

    proptest! {
        /// Two toggles in a row return every window to its initial minimized
        /// state, whatever the window population looks like.
        #[test]
        fn prop_double_toggle_is_identity(
            windows in proptest::collection::vec(
                (1u64..100, 0u32..6, 0i32..3, any::<bool>(), any::<bool>(), any::<bool>()),
                0..12,
            ),
            active in 0i32..3,
        ) {
            let shell = Arc::new(MockShell::new());
            shell.set_active_workspace(active);

            let mut seen = std::collections::HashSet::new();
            let mut initial = Vec::new();
            for (id, kind, workspace, minimized, can_minimize, sticky) in windows {
                if !seen.insert(id) {
                    continue; // ids must be unique
                }
                let info = WindowInfo {
                    id: WindowId(id),
                    kind: WindowKind::from_raw(kind),
                    workspace,
                    minimized,
                    can_minimize,
                    on_all_workspaces: sticky,
                };
                shell.add_window(info);
                initial.push((WindowId(id), minimized));
            }

            let mut dispatcher = dispatcher_with(&shell);
            let settings = settings_with_cooldown(0);
            dispatcher.handle_click(ClickSide::Right, &settings);
            dispatcher.handle_click(ClickSide::Right, &settings);

            for (id, minimized) in initial {
                prop_assert_eq!(
                    shell.is_minimized(id),
                    minimized,
                    "window {} changed state after a double toggle",
                    id
                );
            }
        }
    }
}
