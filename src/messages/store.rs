//! Store messages - communication between App and Store layers

use crate::models::Status;
use crate::store::error::StoreError;

/// Commands sent from App layer to the store actor
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Replace the available statuses with a fresh batch
    Fetch,
    /// Copy a status into the saved collection
    Save(Status),
    /// Remove a status from the saved collection
    Delete {
        id: String,
        file_name: String,
    },
    /// Stop the store actor
    Shutdown,
}

/// Which operation a response refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Fetch,
    Save,
    Delete,
}

/// Outcomes sent from the store actor back to the App layer
#[derive(Debug, Clone)]
pub enum StoreResponse {
    Fetched {
        count: usize,
    },
    Saved {
        id: String,
        file_name: String,
    },
    Deleted {
        id: String,
        file_name: String,
    },
    Failed {
        operation: StoreOperation,
        /// Status id for save and delete
        id: Option<String>,
        error: StoreError,
    },
}
