//! Simulated durable storage with latency and an optional quota

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::constants::{DELETE_DELAY_MS, SAVE_DELAY_MS};
use crate::media::MediaStorage;
use crate::models::Status;
use crate::store::error::StorageError;

/// In-memory stand-in for the device's saved-media folder
pub struct SimulatedStorage {
    save_delay: Duration,
    delete_delay: Duration,
    quota: Option<u64>,
    stored: Mutex<HashMap<String, u64>>,
}

impl SimulatedStorage {
    pub fn new() -> Self {
        SimulatedStorage {
            save_delay: Duration::from_millis(SAVE_DELAY_MS),
            delete_delay: Duration::from_millis(DELETE_DELAY_MS),
            quota: None,
            stored: Mutex::new(HashMap::new()),
        }
    }

    /// Storage that responds without delay
    pub fn instant() -> Self {
        SimulatedStorage {
            save_delay: Duration::ZERO,
            delete_delay: Duration::ZERO,
            ..Self::new()
        }
    }

    /// Limit total stored bytes
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Bytes currently held
    pub fn used(&self) -> u64 {
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .sum()
    }
}

impl Default for SimulatedStorage {
    fn default() -> Self {
        Self::new()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl MediaStorage for SimulatedStorage {
    async fn store(&self, status: &Status) -> Result<(), StorageError> {
        pause(self.save_delay).await;

        let mut stored = self.stored.lock().unwrap_or_else(|e| e.into_inner());
        if stored.contains_key(&status.id) {
            return Ok(());
        }

        if let Some(quota) = self.quota {
            let used: u64 = stored.values().sum();
            let available = quota.saturating_sub(used);
            if status.size > available {
                return Err(StorageError::InsufficientSpace {
                    required: status.size,
                    available,
                });
            }
        }

        stored.insert(status.id.clone(), status.size);
        Ok(())
    }

    async fn remove(&self, status: &Status) -> Result<(), StorageError> {
        pause(self.delete_delay).await;
        self.stored
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&status.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn status(id: &str, size: u64) -> Status {
        Status {
            id: id.to_string(),
            media_type: MediaType::Image,
            thumbnail: String::new(),
            full_url: String::new(),
            file_name: format!("{}.jpg", id),
            timestamp: 0,
            size,
            is_saved: false,
        }
    }

    #[tokio::test]
    async fn test_store_and_remove_track_usage() {
        let storage = SimulatedStorage::instant();
        storage.store(&status("a", 100)).await.unwrap();
        storage.store(&status("b", 50)).await.unwrap();
        storage.store(&status("a", 100)).await.unwrap();
        assert_eq!(storage.used(), 150);

        storage.remove(&status("a", 100)).await.unwrap();
        assert_eq!(storage.used(), 50);
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let storage = SimulatedStorage::instant().with_quota(120);
        storage.store(&status("a", 100)).await.unwrap();
        let err = storage.store(&status("b", 50)).await.unwrap_err();
        assert_eq!(
            err,
            StorageError::InsufficientSpace {
                required: 50,
                available: 20
            }
        );
        assert_eq!(storage.used(), 100);
    }
}
