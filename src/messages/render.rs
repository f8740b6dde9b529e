//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::Toast;
use crate::messages::ui_events::{AppTab, Overlays};
use crate::models::{Status, Theme};
use crate::store::StoreSnapshot;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Store data
    pub store: StoreSnapshot,

    // Selection
    pub home_selected: usize,
    pub saved_selected: usize,
    pub theme_cursor: usize,

    // Appearance
    pub theme: Theme,
    /// `theme` with `System` already resolved
    pub effective_theme: Theme,

    // Popups
    pub viewer: Option<Status>,
    pub viewer_saving: bool,
    pub confirm_delete: Option<Status>,
    pub show_help: bool,

    pub toast: Option<Toast>,

    /// Text for the UI to put on the clipboard, present for one frame
    pub clipboard: Option<String>,
}

impl RenderState {
    /// Overlays currently capturing input
    pub fn overlays(&self) -> Overlays {
        Overlays {
            help: self.show_help,
            confirm_delete: self.confirm_delete.is_some(),
            viewer: self.viewer.is_some(),
        }
    }
}
