//! App actor - message loop processing UI events, store snapshots and store responses

use tokio::sync::{mpsc, watch};

use crate::app::state::AppState;
use crate::messages::{RenderState, StoreCommand, StoreResponse, UiEvent};
use crate::preferences::PreferenceStore;
use crate::store::StoreSnapshot;

/// App actor that processes UI events and store output
pub struct AppActor {
    state: AppState,
    store_tx: mpsc::UnboundedSender<StoreCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        preferences: PreferenceStore,
        store_tx: mpsc::UnboundedSender<StoreCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(preferences),
            store_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut store_rx: mpsc::UnboundedReceiver<StoreResponse>,
        mut snapshot_rx: watch::Receiver<StoreSnapshot>,
    ) {
        // Home screen loads statuses as soon as it is shown
        let _ = self.store_tx.send(StoreCommand::Fetch);
        self.render();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.store_tx.send(StoreCommand::Shutdown);
                        break;
                    }
                    self.render();
                }
                Ok(()) = snapshot_rx.changed() => {
                    let snapshot = snapshot_rx.borrow_and_update().clone();
                    self.state.apply_snapshot(snapshot);
                    self.render();
                }
                Some(response) = store_rx.recv() => {
                    self.state.handle_store_response(response);
                    self.render();
                }
                else => break,
            }
        }
    }

    /// Push the current state to the UI. Clipboard text is sent only once.
    fn render(&mut self) {
        let _ = self.render_tx.send(self.state.to_render_state());
        self.state.clipboard = None;
    }

    fn send(&self, cmd: Option<StoreCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.store_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tab switching
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),

            // Selection
            UiEvent::MoveUp => self.state.move_up(),
            UiEvent::MoveDown => self.state.move_down(),
            UiEvent::MoveLeft => self.state.move_left(),
            UiEvent::MoveRight => self.state.move_right(),

            // Status actions
            UiEvent::Refresh => {
                let cmd = self.state.refresh();
                self.send(cmd);
            }
            UiEvent::OpenViewer => self.state.open_viewer(),
            UiEvent::CloseViewer => self.state.close_viewer(),
            UiEvent::SaveSelected => {
                let cmd = self.state.save_selected();
                self.send(cmd);
            }
            UiEvent::ShareSelected => self.state.share_selected(),
            UiEvent::ShareAll => self.state.share_all(),
            UiEvent::RequestDelete => self.state.request_delete(),
            UiEvent::ConfirmDelete => {
                let cmd = self.state.confirm_delete();
                self.send(cmd);
            }
            UiEvent::CancelDelete => self.state.cancel_delete(),

            // Settings
            UiEvent::ApplyTheme => self.state.apply_theme(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::media::{MockDiscovery, SimulatedStorage};
    use crate::store::{StatusStore, StoreActor};
    use tempfile::tempdir;

    /// Wait for the first render state matching `pred`
    async fn render_until(
        render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
        pred: impl Fn(&RenderState) -> bool,
    ) -> RenderState {
        loop {
            let state = tokio::time::timeout(Duration::from_secs(5), render_rx.recv())
                .await
                .expect("timed out waiting for render state")
                .expect("render channel closed");
            if pred(&state) {
                return state;
            }
        }
    }

    #[tokio::test]
    async fn test_startup_fetch_then_save_and_delete() {
        let dir = tempdir().unwrap();
        let store = StatusStore::new(
            Arc::new(MockDiscovery::seeded(5).with_delay(Duration::ZERO)),
            Arc::new(SimulatedStorage::instant()),
        );

        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (store_cmd_tx, store_cmd_rx) = mpsc::unbounded_channel();
        let (store_resp_tx, store_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let store_actor = StoreActor::new(store, store_resp_tx);
        let snapshots = store_actor.subscribe();
        tokio::spawn(store_actor.run(store_cmd_rx));

        let app = AppActor::new(PreferenceStore::in_dir(dir.path()), store_cmd_tx, render_tx);
        let handle = tokio::spawn(app.run(ui_rx, store_resp_rx, snapshots));

        let loaded = render_until(&mut render_rx, |s| s.store.statuses.len() == 20 && !s.store.is_loading).await;
        assert!(loaded.store.saved.is_empty());

        ui_tx.send(UiEvent::ShareSelected).unwrap();
        let shared = render_until(&mut render_rx, |s| s.clipboard.is_some()).await;
        assert_eq!(shared.clipboard.as_deref(), Some(shared.store.statuses[0].full_url.as_str()));

        ui_tx.send(UiEvent::SaveSelected).unwrap();
        let saved = render_until(&mut render_rx, |s| s.store.saved.len() == 1).await;
        assert_eq!(saved.store.saved[0].id, "status-1");
        assert!(saved.clipboard.is_none());

        ui_tx.send(UiEvent::SwitchTab(crate::messages::ui_events::AppTab::Saved)).unwrap();
        ui_tx.send(UiEvent::RequestDelete).unwrap();
        ui_tx.send(UiEvent::ConfirmDelete).unwrap();
        let deleted = render_until(&mut render_rx, |s| {
            s.store.saved.is_empty() && s.toast.as_ref().map(|t| t.title == "Status Deleted").unwrap_or(false)
        })
        .await;
        assert!(deleted.store.statuses.iter().all(|s| !s.is_saved));

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();
    }
}
