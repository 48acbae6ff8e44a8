//! In-memory shell double
//!
//! Records every call the core makes against the capability traits so tests
//! can assert on exact interaction sequences, and models enough panel and
//! window state (parents, indices, minimized flags) to exercise the
//! presentation and dispatch logic end to end.

use crate::config::models::PanelRegion;
use crate::error::{PanelLogoError, Result, StringError};
use crate::shell::{
    ButtonId, IconContent, Launcher, OverviewOps, PanelOps, WindowId, WindowInfo, WindowOps,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// One recorded panel operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCall {
    /// `add_to_area(region, index)`
    AddToArea(PanelRegion, i32),
    /// `set_child_index(index)`
    SetChildIndex(i32),
    /// `remove()`
    Remove,
    /// `insert(region, index)`
    Insert(PanelRegion, i32),
    /// `set_content(..)`
    SetContent,
}

#[derive(Debug, Default)]
struct ButtonState {
    parent: Option<PanelRegion>,
    index: i32,
    content: Option<IconContent>,
    content_sets: usize,
}

#[derive(Debug, Default)]
struct MockState {
    buttons: HashMap<ButtonId, ButtonState>,
    panel_calls: Vec<PanelCall>,
    windows: Vec<WindowInfo>,
    active_workspace: i32,
    overview_visible: bool,
    overview_toggles: usize,
    hide_overview_calls: usize,
    show_applications_calls: usize,
    spawned: Vec<String>,
    fail_list_windows: bool,
}

/// Recording in-memory implementation of every shell trait
#[derive(Debug, Default)]
pub struct MockShell {
    state: Mutex<MockState>,
}

impl MockShell {
    /// Create an empty mock shell
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window to the mock window manager
    pub fn add_window(&self, window: WindowInfo) {
        self.state.lock().windows.push(window);
    }

    /// Set the active workspace index
    pub fn set_active_workspace(&self, workspace: i32) {
        self.state.lock().active_workspace = workspace;
    }

    /// Make `list_windows` fail until cleared
    pub fn set_fail_list_windows(&self, fail: bool) {
        self.state.lock().fail_list_windows = fail;
    }

    /// Current minimized flag of a window
    pub fn is_minimized(&self, id: WindowId) -> bool {
        self.state
            .lock()
            .windows
            .iter()
            .find(|w| w.id == id)
            .is_some_and(|w| w.minimized)
    }

    /// Every recorded panel operation, in order
    pub fn panel_calls(&self) -> Vec<PanelCall> {
        self.state.lock().panel_calls.clone()
    }

    /// Region currently parenting the button
    pub fn button_parent(&self, button: &ButtonId) -> Option<PanelRegion> {
        self.state
            .lock()
            .buttons
            .get(button)
            .and_then(|b| b.parent)
    }

    /// Index of the button within its parent
    pub fn button_index(&self, button: &ButtonId) -> Option<i32> {
        self.state.lock().buttons.get(button).map(|b| b.index)
    }

    /// Content currently attached to the button
    pub fn button_content(&self, button: &ButtonId) -> Option<IconContent> {
        self.state
            .lock()
            .buttons
            .get(button)
            .and_then(|b| b.content.clone())
    }

    /// How many times content was replaced on the button
    pub fn content_set_count(&self, button: &ButtonId) -> usize {
        self.state
            .lock()
            .buttons
            .get(button)
            .map_or(0, |b| b.content_sets)
    }

    /// Number of overview toggles seen
    pub fn overview_toggles(&self) -> usize {
        self.state.lock().overview_toggles
    }

    /// Number of `hide_overview` calls seen
    pub fn hide_overview_calls(&self) -> usize {
        self.state.lock().hide_overview_calls
    }

    /// Number of `show_applications` calls seen
    pub fn show_applications_calls(&self) -> usize {
        self.state.lock().show_applications_calls
    }

    /// Set the overview visibility flag directly
    pub fn set_overview_visible(&self, visible: bool) {
        self.state.lock().overview_visible = visible;
    }

    /// Every spawned command line, in order
    pub fn spawned(&self) -> Vec<String> {
        self.state.lock().spawned.clone()
    }
}

impl PanelOps for MockShell {
    fn add_to_area(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.panel_calls.push(PanelCall::AddToArea(region, index));
        let entry = state.buttons.entry(button.clone()).or_default();
        entry.parent = Some(region);
        entry.index = index;
        Ok(())
    }

    fn parent(&self, button: &ButtonId) -> Result<Option<PanelRegion>> {
        Ok(self
            .state
            .lock()
            .buttons
            .get(button)
            .and_then(|b| b.parent))
    }

    fn child_index(&self, button: &ButtonId) -> Result<i32> {
        self.state
            .lock()
            .buttons
            .get(button)
            .filter(|b| b.parent.is_some())
            .map(|b| b.index)
            .ok_or_else(|| {
                PanelLogoError::ShellApiError(StringError::new("button has no parent"))
            })
    }

    fn set_child_index(&self, button: &ButtonId, index: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.panel_calls.push(PanelCall::SetChildIndex(index));
        let entry = state.buttons.entry(button.clone()).or_default();
        entry.index = index;
        Ok(())
    }

    fn remove(&self, button: &ButtonId) -> Result<()> {
        let mut state = self.state.lock();
        state.panel_calls.push(PanelCall::Remove);
        let entry = state.buttons.entry(button.clone()).or_default();
        entry.parent = None;
        Ok(())
    }

    fn insert(&self, button: &ButtonId, region: PanelRegion, index: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.panel_calls.push(PanelCall::Insert(region, index));
        let entry = state.buttons.entry(button.clone()).or_default();
        entry.parent = Some(region);
        entry.index = index;
        Ok(())
    }

    fn set_content(&self, button: &ButtonId, content: &IconContent) -> Result<()> {
        let mut state = self.state.lock();
        state.panel_calls.push(PanelCall::SetContent);
        let entry = state.buttons.entry(button.clone()).or_default();
        entry.content = Some(content.clone());
        entry.content_sets += 1;
        Ok(())
    }
}

impl WindowOps for MockShell {
    fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let state = self.state.lock();
        if state.fail_list_windows {
            return Err(PanelLogoError::WindowControlFailed(StringError::new(
                "window enumeration unavailable",
            )));
        }
        Ok(state.windows.clone())
    }

    fn minimize(&self, window: WindowId) -> Result<()> {
        let mut state = self.state.lock();
        match state.windows.iter_mut().find(|w| w.id == window) {
            Some(w) => {
                w.minimized = true;
                Ok(())
            }
            None => Err(PanelLogoError::WindowControlFailed(StringError::new(
                format!("no such window: {window}"),
            ))),
        }
    }

    fn unminimize(&self, window: WindowId) -> Result<()> {
        let mut state = self.state.lock();
        match state.windows.iter_mut().find(|w| w.id == window) {
            Some(w) => {
                w.minimized = false;
                Ok(())
            }
            None => Err(PanelLogoError::WindowControlFailed(StringError::new(
                format!("no such window: {window}"),
            ))),
        }
    }

    fn active_workspace(&self) -> Result<i32> {
        Ok(self.state.lock().active_workspace)
    }
}

impl OverviewOps for MockShell {
    fn toggle_overview(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.overview_visible = !state.overview_visible;
        state.overview_toggles += 1;
        Ok(())
    }

    fn overview_visible(&self) -> Result<bool> {
        Ok(self.state.lock().overview_visible)
    }

    fn hide_overview(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.overview_visible = false;
        state.hide_overview_calls += 1;
        Ok(())
    }

    fn show_applications(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.overview_visible = true;
        state.show_applications_calls += 1;
        Ok(())
    }
}

impl Launcher for MockShell {
    fn spawn(&self, command_line: &str) -> Result<()> {
        self.state.lock().spawned.push(command_line.to_string());
        Ok(())
    }
}
