//! Store layer - the single source of truth for statuses
//!
//! `StatusStore` owns the collections; `StoreActor` wraps it in a message
//! loop so the App layer can drive it over channels.

pub mod actor;
pub mod error;
pub mod state;

pub use actor::StoreActor;
pub use error::{DiscoveryError, StorageError, StoreError};
pub use state::{StatusStore, StoreSnapshot};
