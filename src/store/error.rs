//! Error taxonomy for store operations

/// Discovery of available statuses failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiscoveryError {
    /// Provider could not be reached
    #[error("status provider unavailable: {0}")]
    Unavailable(String),
    /// Media folder is not readable
    #[error("permission denied while reading statuses")]
    PermissionDenied,
}

/// Copying media to or from durable storage failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("insufficient space: {required} bytes required, {available} available")]
    InsufficientSpace { required: u64, available: u64 },
    #[error("permission denied while accessing storage")]
    PermissionDenied,
    #[error("storage I/O failed: {0}")]
    Io(String),
}

/// Error surfaced by a store operation.
///
/// A failed operation leaves both collections as they were.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;
