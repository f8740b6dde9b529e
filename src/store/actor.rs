//! Store actor - owns the status store and runs its operations in order

use tokio::sync::{mpsc, watch};

use crate::messages::{StoreCommand, StoreOperation, StoreResponse};
use crate::store::state::{StatusStore, StoreSnapshot};

/// Store actor that processes store commands one at a time.
///
/// Commands queue on the channel, so overlapping requests from the UI never
/// interleave; a second fetch waits for the first and its result wins.
pub struct StoreActor {
    store: StatusStore,
    response_tx: mpsc::UnboundedSender<StoreResponse>,
}

impl StoreActor {
    pub fn new(store: StatusStore, response_tx: mpsc::UnboundedSender<StoreResponse>) -> Self {
        StoreActor { store, response_tx }
    }

    /// Snapshot stream for consumers; subscribe before `run` consumes the actor
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.store.subscribe()
    }

    /// Run the store actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<StoreCommand>) {
        while let Some(cmd) = cmd_rx.recv().await {
            let response = match cmd {
                StoreCommand::Fetch => {
                    tracing::info!("Fetching statuses");
                    match self.store.fetch_statuses().await {
                        Ok(count) => StoreResponse::Fetched { count },
                        Err(error) => StoreResponse::Failed {
                            operation: StoreOperation::Fetch,
                            id: None,
                            error,
                        },
                    }
                }

                StoreCommand::Save(status) => {
                    tracing::info!(id = %status.id, "Saving status");
                    match self.store.save_status(&status).await {
                        Ok(()) => StoreResponse::Saved {
                            id: status.id,
                            file_name: status.file_name,
                        },
                        Err(error) => StoreResponse::Failed {
                            operation: StoreOperation::Save,
                            id: Some(status.id),
                            error,
                        },
                    }
                }

                StoreCommand::Delete { id, file_name } => {
                    tracing::info!(id = %id, "Deleting status");
                    match self.store.delete_status(&id).await {
                        Ok(()) => StoreResponse::Deleted { id, file_name },
                        Err(error) => StoreResponse::Failed {
                            operation: StoreOperation::Delete,
                            id: Some(id),
                            error,
                        },
                    }
                }

                StoreCommand::Shutdown => break,
            };

            let _ = self.response_tx.send(response);
        }
    }
}
