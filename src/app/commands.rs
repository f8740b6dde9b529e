//! Command handlers - business logic for processing UI events and store responses

use crate::app::AppState;
use crate::app::state::Toast;
use crate::constants::GRID_COLUMNS;
use crate::messages::ui_events::AppTab;
use crate::messages::{StoreCommand, StoreOperation, StoreResponse};
use crate::models::Theme;
use crate::store::StoreSnapshot;

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
        if tab == AppTab::Settings {
            self.theme_cursor = self.preferences.theme_index();
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.active_tab {
            AppTab::Saved => &mut self.saved_selected,
            AppTab::Home => &mut self.home_selected,
            AppTab::Settings => &mut self.theme_cursor,
        }
    }

    /// Move the selection by `delta` cells, staying inside the list
    fn move_selection(&mut self, delta: isize) {
        let len = match self.active_tab {
            AppTab::Settings => Theme::ALL.len(),
            _ => self.visible_statuses().len(),
        };
        if len == 0 {
            return;
        }
        let selected = self.selection_mut();
        let target = *selected as isize + delta;
        if (0..len as isize).contains(&target) {
            *selected = target as usize;
        }
    }

    pub fn move_up(&mut self) {
        let step = if self.active_tab == AppTab::Settings { 1 } else { GRID_COLUMNS };
        self.move_selection(-(step as isize));
    }

    pub fn move_down(&mut self) {
        let step = if self.active_tab == AppTab::Settings { 1 } else { GRID_COLUMNS };
        self.move_selection(step as isize);
    }

    pub fn move_left(&mut self) {
        if *self.selection_mut() % GRID_COLUMNS > 0 {
            self.move_selection(-1);
        }
    }

    pub fn move_right(&mut self) {
        if *self.selection_mut() % GRID_COLUMNS < GRID_COLUMNS - 1 {
            self.move_selection(1);
        }
    }

    // ========================
    // Store snapshots
    // ========================

    /// Take a new snapshot and keep selections within bounds
    pub fn apply_snapshot(&mut self, snapshot: StoreSnapshot) {
        self.store = snapshot;
        self.home_selected = clamp_index(self.home_selected, self.store.statuses.len());
        self.saved_selected = clamp_index(self.saved_selected, self.store.saved.len());
        if self.viewer_id.is_some() && self.viewer_status().is_none() {
            self.viewer_id = None;
        }
    }

    // ========================
    // Status actions
    // ========================

    pub fn refresh(&mut self) -> Option<StoreCommand> {
        if self.store.is_loading {
            return None;
        }
        Some(StoreCommand::Fetch)
    }

    pub fn open_viewer(&mut self) {
        self.viewer_id = self.selected_status().map(|s| s.id.clone());
    }

    pub fn close_viewer(&mut self) {
        self.viewer_id = None;
    }

    /// Save the status in the viewer, or the highlighted card
    pub fn save_selected(&mut self) -> Option<StoreCommand> {
        let status = match self.viewer_id {
            Some(_) => self.viewer_status(),
            None => self.selected_status(),
        }?
        .clone();

        if status.is_saved {
            self.toast = Some(Toast::info(
                "Already Saved",
                "This status is already in your saved collection.",
            ));
            return None;
        }

        if !self.pending_saves.insert(status.id.clone()) {
            return None;
        }
        Some(StoreCommand::Save(status))
    }

    // ========================
    // Sharing
    // ========================

    /// Copy the media link of the viewer or highlighted status
    pub fn share_selected(&mut self) {
        let status = match self.viewer_id {
            Some(_) => self.viewer_status(),
            None => self.selected_status(),
        };
        let Some(link) = status.map(|s| s.full_url.clone()) else {
            return;
        };
        self.clipboard = Some(link);
        self.toast = Some(Toast::info(
            "Link Copied",
            "Status link has been copied to clipboard.",
        ));
    }

    /// Copy the saved file names, one per line
    pub fn share_all(&mut self) {
        if self.store.saved.is_empty() {
            return;
        }
        let list = self
            .store
            .saved
            .iter()
            .map(|s| s.file_name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.clipboard = Some(list);
        self.toast = Some(Toast::info(
            "List Copied",
            "Saved statuses list copied to clipboard.",
        ));
    }

    pub fn request_delete(&mut self) {
        if self.active_tab == AppTab::Saved {
            self.confirm_delete = self.selected_status().cloned();
        }
    }

    pub fn confirm_delete(&mut self) -> Option<StoreCommand> {
        self.confirm_delete.take().map(|status| StoreCommand::Delete {
            id: status.id,
            file_name: status.file_name,
        })
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    // ========================
    // Settings
    // ========================

    pub fn apply_theme(&mut self) {
        let Some(theme) = Theme::ALL.get(self.theme_cursor).copied() else {
            return;
        };
        if theme == self.preferences.preferences.theme {
            return;
        }

        match self.preferences.set_theme(theme) {
            Ok(()) => {
                self.toast = Some(Toast::info(
                    "Theme Updated",
                    format!("{} theme applied.", theme.label()),
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist theme");
                self.toast = Some(Toast::error(
                    "Theme Not Saved",
                    format!("{} theme applied for this session only.", theme.label()),
                ));
            }
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Store responses
    // ========================

    pub fn handle_store_response(&mut self, response: StoreResponse) {
        let toast = match response {
            StoreResponse::Fetched { count } => {
                tracing::debug!(count, "Fetch completed");
                None
            }
            StoreResponse::Saved { id, file_name } => {
                self.pending_saves.remove(&id);
                Some(Toast::info(
                    "Status Saved",
                    format!("{} has been saved successfully.", file_name),
                ))
            }
            StoreResponse::Deleted { file_name, .. } => Some(Toast::info(
                "Status Deleted",
                format!("{} has been removed from saved statuses.", file_name),
            )),
            StoreResponse::Failed { operation, id, error } => {
                if let Some(id) = &id {
                    self.pending_saves.remove(id);
                }
                tracing::warn!(?operation, id = ?id, error = %error, "Store operation failed");
                let toast = match operation {
                    StoreOperation::Fetch => Toast::error(
                        "Refresh Failed",
                        format!("Could not load statuses: {}.", error),
                    ),
                    StoreOperation::Save => Toast::error(
                        "Save Failed",
                        "Failed to save the status. Please try again.",
                    ),
                    StoreOperation::Delete => Toast::error(
                        "Delete Failed",
                        "Failed to delete the status. Please try again.",
                    ),
                };
                Some(toast)
            }
        };

        if toast.is_some() {
            self.toast = toast;
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
