//! Presentation controller
//!
//! Derives the displayed icon and the button's panel placement from the
//! current settings, and re-applies them on every relevant settings change.
//! Neither operation lets an error escape: icon failures degrade to a
//! themed fallback inside [`icon`], and panel failures are logged and
//! dropped, because a presentation glitch must never take the applet down.

pub mod icon;

use crate::config::models::{PanelRegion, Settings};
use crate::error::Result;
use crate::shell::{ButtonId, PanelOps};
use crate::utils::paths;
use std::sync::Arc;

/// Keeps the status-area button's icon and position in sync with settings
pub struct Presenter {
    panel: Arc<dyn PanelOps>,
    button: ButtonId,
}

impl Presenter {
    /// Create a presenter owning a fresh button identity
    pub fn new(panel: Arc<dyn PanelOps>) -> Self {
        Self {
            panel,
            button: ButtonId::new(),
        }
    }

    /// The instance identifier keying this button in the status area
    pub fn button_id(&self) -> &ButtonId {
        &self.button
    }

    /// Rebuild the button content from the icon settings.
    ///
    /// All prior content is replaced with exactly one icon; on any failure
    /// the replacement carries a themed fallback instead.
    pub fn update_icon(&self, settings: &Settings) {
        use tracing::{debug, warn};

        let content = icon::build_content(settings, &paths::home_dir());
        debug!(
            "Updating icon: {:?} at {}px, padding {}px",
            content.icon, content.size, content.padding
        );
        if let Err(e) = self.panel.set_content(&self.button, &content) {
            warn!("Failed to update button content: {}", e);
        }
    }

    /// Move the button to the configured region and order.
    ///
    /// Re-indexing within the same region never detaches the button; only a
    /// region change does. Out-of-range orders are clamped by the container.
    pub fn update_position(&self, settings: &Settings) {
        use tracing::warn;

        if let Err(e) = self.apply_position(settings.icon_position, settings.icon_order) {
            warn!("Failed to update button position: {}", e);
        }
    }

    fn apply_position(&self, target: PanelRegion, order: i32) -> Result<()> {
        use tracing::debug;

        match self.panel.parent(&self.button)? {
            // Not yet in the panel: initial status-area insertion
            None => {
                debug!("Adding button to {target} at index {order}");
                self.panel.add_to_area(&self.button, target, order)
            }
            // Right region already: re-index only when the order differs
            Some(current) if current == target => {
                let index = self.panel.child_index(&self.button)?;
                if index != order {
                    debug!("Re-indexing button within {target}: {index} -> {order}");
                    self.panel.set_child_index(&self.button, order)?;
                }
                Ok(())
            }
            // Wrong region: detach and re-insert
            Some(current) => {
                debug!("Moving button from {current} to {target} at index {order}");
                self.panel.remove(&self.button)?;
                self.panel.insert(&self.button, target, order)
            }
        }
    }
}
