//! Integration tests wiring the controller, presenter, and dispatcher
//! together over the in-memory shell, the way `main` wires them over the
//! D-Bus bridge.

use panel_logo::config::models::{ClickAction, ClickSide, PanelRegion, Settings};
use panel_logo::config::ConfigManager;
use panel_logo::controller::AppController;
use panel_logo::dispatcher::Dispatcher;
use panel_logo::monitor::{SettingsMonitor, Subscriptions};
use panel_logo::presenter::Presenter;
use panel_logo::shell::mock::MockShell;
use panel_logo::shell::{
    ClickEvent, Launcher, OverviewOps, PanelOps, WindowId, WindowInfo, WindowKind, WindowOps,
};
use panel_logo::test_utils::{EnvGuard, create_test_dir};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

struct Harness {
    shell: Arc<MockShell>,
    click_tx: mpsc::SyncSender<ClickEvent>,
    settings_tx: mpsc::SyncSender<panel_logo::monitor::SettingsEvent>,
    button: panel_logo::shell::ButtonId,
    thread: thread::JoinHandle<()>,
}

/// Build the full applet object graph over a mock shell and start its loop
fn start(settings: Settings) -> Harness {
    let shell = Arc::new(MockShell::new());
    let presenter = Presenter::new(Arc::<MockShell>::clone(&shell) as Arc<dyn PanelOps>);
    let dispatcher = Dispatcher::new(
        Arc::<MockShell>::clone(&shell) as Arc<dyn WindowOps>,
        Arc::<MockShell>::clone(&shell) as Arc<dyn OverviewOps>,
        Arc::<MockShell>::clone(&shell) as Arc<dyn Launcher>,
    );

    let (click_tx, click_rx) = mpsc::sync_channel(32);
    let (settings_tx, settings_rx) = mpsc::sync_channel(32);

    let mut controller =
        AppController::new(settings, presenter, dispatcher, click_rx, settings_rx);
    let button = controller.button_id();
    controller.present_initial();

    let thread = thread::spawn(move || controller.run());

    Harness {
        shell,
        click_tx,
        settings_tx,
        button,
        thread,
    }
}

fn settle() {
    thread::sleep(Duration::from_millis(250));
}

#[test]
fn initial_presentation_attaches_one_icon_at_configured_position() {
    let mut settings = Settings::default();
    settings.icon_position = PanelRegion::Center;
    settings.icon_order = 1;

    let harness = start(settings);

    assert_eq!(harness.shell.content_set_count(&harness.button), 1);
    assert_eq!(
        harness.shell.button_parent(&harness.button),
        Some(PanelRegion::Center)
    );
    assert_eq!(harness.shell.button_index(&harness.button), Some(1));

    drop(harness.click_tx);
    harness.thread.join().unwrap();
}

#[test]
fn left_click_toggles_overview_and_loop_exits_on_disconnect() {
    let mut settings = Settings::default();
    settings.click_cooldown_ms = 0;

    let harness = start(settings);
    harness
        .click_tx
        .send(ClickEvent {
            side: ClickSide::Left,
        })
        .unwrap();
    settle();

    assert_eq!(harness.shell.overview_toggles(), 1);

    drop(harness.click_tx);
    harness.thread.join().unwrap();
}

#[test]
fn hide_then_restore_round_trips_through_the_full_stack() {
    fn window(id: u64, minimized: bool) -> WindowInfo {
        WindowInfo {
            id: WindowId(id),
            kind: WindowKind::Normal,
            workspace: 0,
            minimized,
            can_minimize: true,
            on_all_workspaces: false,
        }
    }

    let mut settings = Settings::default();
    settings.click_cooldown_ms = 0;

    let harness = start(settings);
    harness.shell.add_window(window(1, false));
    harness.shell.add_window(window(2, true));

    let right_click = ClickEvent {
        side: ClickSide::Right,
    };
    harness.click_tx.send(right_click).unwrap();
    settle();
    assert!(harness.shell.is_minimized(WindowId(1)));

    harness.click_tx.send(right_click).unwrap();
    settle();
    assert!(!harness.shell.is_minimized(WindowId(1)));
    assert!(
        harness.shell.is_minimized(WindowId(2)),
        "the pre-minimized window must stay minimized"
    );

    drop(harness.click_tx);
    harness.thread.join().unwrap();
}

#[test]
fn cooldown_gates_back_to_back_clicks_through_the_loop() {
    let mut settings = Settings::default();
    settings.click_cooldown_ms = 300;

    let harness = start(settings);
    let left_click = ClickEvent {
        side: ClickSide::Left,
    };
    // Two clicks land well inside the cooldown window
    harness.click_tx.send(left_click).unwrap();
    harness.click_tx.send(left_click).unwrap();
    settle();
    assert_eq!(harness.shell.overview_toggles(), 1);

    // A third click after the cooldown goes through
    thread::sleep(Duration::from_millis(400));
    harness.click_tx.send(left_click).unwrap();
    settle();
    assert_eq!(harness.shell.overview_toggles(), 2);

    drop(harness.click_tx);
    harness.thread.join().unwrap();
}

#[test]
fn settings_change_moves_button_and_rebinds_clicks() {
    let mut initial = Settings::default();
    initial.click_cooldown_ms = 0;
    let harness = start(initial.clone());

    let mut changed = initial;
    changed.icon_position = PanelRegion::Right;
    changed.icon_order = 3;
    changed.left_click_action = ClickAction::RunCommand;
    changed.left_custom_command = "notify-send hello".to_string();

    let delta = panel_logo::monitor::SettingsDelta {
        icon: false,
        position: true,
    };
    harness
        .settings_tx
        .send(panel_logo::monitor::SettingsEvent {
            settings: changed,
            delta,
        })
        .unwrap();
    settle();

    assert_eq!(
        harness.shell.button_parent(&harness.button),
        Some(PanelRegion::Right)
    );
    assert_eq!(harness.shell.button_index(&harness.button), Some(3));

    harness
        .click_tx
        .send(ClickEvent {
            side: ClickSide::Left,
        })
        .unwrap();
    settle();
    assert_eq!(
        harness.shell.spawned(),
        vec!["notify-send hello".to_string()]
    );

    drop(harness.click_tx);
    harness.thread.join().unwrap();
}

#[test]
fn settings_monitor_feeds_the_running_loop_from_disk() {
    // The one end-to-end path that touches the real settings file: a save by
    // the preferences surface reaches the running controller
    let temp_dir = create_test_dir();
    let _guard = EnvGuard::set(&[("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap())]);

    let initial = Settings::default();
    ConfigManager::save(&initial).unwrap();

    let harness = start(initial.clone());
    let mut subscriptions = Subscriptions::new();
    subscriptions.register(
        SettingsMonitor::new(initial.clone(), Duration::from_millis(20), harness.settings_tx.clone())
            .start(),
    );

    // Give the monitor a moment to seed its baseline before the edit
    thread::sleep(Duration::from_millis(80));

    let mut changed = initial;
    changed.icon_position = PanelRegion::Center;
    ConfigManager::save(&changed).unwrap();

    // Poll interval + controller loop latency
    thread::sleep(Duration::from_millis(600));
    assert_eq!(
        harness.shell.button_parent(&harness.button),
        Some(PanelRegion::Center)
    );

    subscriptions.teardown();
    drop(harness.click_tx);
    harness.thread.join().unwrap();
}
