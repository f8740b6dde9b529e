//! Media collaborators - discovery of available statuses and durable storage
//!
//! The store only talks to these traits; the concrete implementations here
//! simulate a device with latency instead of touching the file system.

pub mod discovery;
pub mod storage;

use async_trait::async_trait;

use crate::models::Status;
use crate::store::error::{DiscoveryError, StorageError};

pub use discovery::MockDiscovery;
pub use storage::SimulatedStorage;

/// Enumerates the statuses currently available on the device
#[async_trait]
pub trait MediaDiscovery: Send + Sync {
    async fn discover(&self) -> Result<Vec<Status>, DiscoveryError>;
}

/// Copies status media to durable storage and removes it again
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn store(&self, status: &Status) -> Result<(), StorageError>;
    async fn remove(&self, status: &Status) -> Result<(), StorageError>;
}
