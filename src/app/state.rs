//! App state - pure data structure with no I/O logic

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::constants::TOAST_LIFETIME_MS;
use crate::messages::ui_events::AppTab;
use crate::messages::RenderState;
use crate::models::Status;
use crate::preferences::PreferenceStore;
use crate::store::StoreSnapshot;

/// A transient notification shown after an operation resolves
#[derive(Clone, Debug)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub is_error: bool,
    pub created_at: Instant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            title: title.into(),
            description: description.into(),
            is_error: false,
            created_at: Instant::now(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            is_error: true,
            ..Toast::info(title, description)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= Duration::from_millis(TOAST_LIFETIME_MS)
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
    pub active_tab: AppTab,

    // Latest store snapshot
    pub store: StoreSnapshot,

    // Selection per screen
    pub home_selected: usize,
    pub saved_selected: usize,
    pub theme_cursor: usize,

    // Preferences (persisted data)
    pub preferences: PreferenceStore,
    /// Terminal background hint used to resolve the system theme
    pub colorfgbg: Option<String>,

    // Viewer
    pub viewer_id: Option<String>,
    pub pending_saves: HashSet<String>,

    // Popups
    pub confirm_delete: Option<Status>,
    pub show_help: bool,
    pub toast: Option<Toast>,

    /// Pending clipboard text, handed to the UI with the next render
    pub clipboard: Option<String>,
}

impl AppState {
    pub fn new(preferences: PreferenceStore) -> Self {
        let theme_cursor = preferences.theme_index();
        AppState {
            active_tab: AppTab::Home,
            store: StoreSnapshot::default(),
            home_selected: 0,
            saved_selected: 0,
            theme_cursor,
            preferences,
            colorfgbg: std::env::var("COLORFGBG").ok(),
            viewer_id: None,
            pending_saves: HashSet::new(),
            confirm_delete: None,
            show_help: false,
            toast: None,
            clipboard: None,
        }
    }

    /// Status list shown on the active tab
    pub fn visible_statuses(&self) -> &[Status] {
        match self.active_tab {
            AppTab::Saved => &self.store.saved,
            _ => &self.store.statuses,
        }
    }

    /// Currently highlighted status on the active tab
    pub fn selected_status(&self) -> Option<&Status> {
        match self.active_tab {
            AppTab::Home => self.store.statuses.get(self.home_selected),
            AppTab::Saved => self.store.saved.get(self.saved_selected),
            AppTab::Settings => None,
        }
    }

    /// Status open in the viewer, resolved against the latest snapshot
    pub fn viewer_status(&self) -> Option<&Status> {
        self.viewer_id.as_deref().and_then(|id| self.store.find(id))
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let viewer = self.viewer_status().cloned();
        let viewer_saving = viewer
            .as_ref()
            .map(|s| self.pending_saves.contains(&s.id))
            .unwrap_or(false);
        let theme = self.preferences.preferences.theme;

        RenderState {
            active_tab: self.active_tab,
            store: self.store.clone(),
            home_selected: self.home_selected,
            saved_selected: self.saved_selected,
            theme_cursor: self.theme_cursor,
            theme,
            effective_theme: theme.resolve(self.colorfgbg.as_deref()),
            viewer,
            viewer_saving,
            confirm_delete: self.confirm_delete.clone(),
            show_help: self.show_help,
            toast: self.toast.clone(),
            clipboard: self.clipboard.clone(),
        }
    }
}
