//! Status store - the owned collections of available and saved statuses

use std::sync::Arc;

use tokio::sync::watch;

use crate::media::{MediaDiscovery, MediaStorage};
use crate::models::Status;
use crate::store::error::StoreResult;

/// Read-only view of the store handed to consumers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub statuses: Vec<Status>,
    pub saved: Vec<Status>,
    pub is_loading: bool,
}

impl StoreSnapshot {
    pub fn find(&self, id: &str) -> Option<&Status> {
        self.statuses
            .iter()
            .find(|s| s.id == id)
            .or_else(|| self.saved.iter().find(|s| s.id == id))
    }
}

/// Single owner of the available and saved collections.
///
/// Every mutation goes through `fetch_statuses`, `save_status` or
/// `delete_status`; each publishes a fresh snapshot once it has changed
/// anything. Methods take `&mut self`, so there is never more than one
/// writer.
pub struct StatusStore {
    statuses: Vec<Status>,
    saved: Vec<Status>,
    is_loading: bool,
    discovery: Arc<dyn MediaDiscovery>,
    storage: Arc<dyn MediaStorage>,
    snapshot_tx: watch::Sender<StoreSnapshot>,
}

impl StatusStore {
    pub fn new(discovery: Arc<dyn MediaDiscovery>, storage: Arc<dyn MediaStorage>) -> Self {
        let (snapshot_tx, _) = watch::channel(StoreSnapshot::default());
        StatusStore {
            statuses: Vec::new(),
            saved: Vec::new(),
            is_loading: false,
            discovery,
            storage,
            snapshot_tx,
        }
    }

    /// Receive a snapshot after every completed mutation
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn saved(&self) -> &[Status] {
        &self.saved
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            statuses: self.statuses.clone(),
            saved: self.saved.clone(),
            is_loading: self.is_loading,
        }
    }

    fn publish(&self) {
        tracing::debug!(
            available = self.statuses.len(),
            saved = self.saved.len(),
            loading = self.is_loading,
            "Publishing snapshot"
        );
        self.snapshot_tx.send_replace(self.snapshot());
    }

    fn is_in_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|s| s.id == id)
    }

    fn mark_available(&mut self, id: &str, saved: bool) {
        for status in self.statuses.iter_mut().filter(|s| s.id == id) {
            status.is_saved = saved;
        }
    }

    /// Replace the available collection with a fresh batch from discovery.
    ///
    /// The loading flag is raised for the duration. On failure the previous
    /// batch is kept. The saved collection is never touched.
    pub async fn fetch_statuses(&mut self) -> StoreResult<usize> {
        self.is_loading = true;
        self.publish();

        let result = self.discovery.discover().await;
        self.is_loading = false;

        match result {
            Ok(batch) => {
                self.statuses = batch
                    .into_iter()
                    .map(|mut s| {
                        s.is_saved = false;
                        s
                    })
                    .collect();
                tracing::info!(count = self.statuses.len(), "Fetched statuses");
                self.publish();
                Ok(self.statuses.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fetch failed");
                self.publish();
                Err(e.into())
            }
        }
    }

    /// Copy `status` into the saved collection.
    ///
    /// Saving an id that is already saved is a no-op apart from re-marking
    /// the available entry. `status` does not need to be in the available
    /// collection.
    pub async fn save_status(&mut self, status: &Status) -> StoreResult<()> {
        if self.is_in_saved(&status.id) {
            tracing::info!(id = %status.id, "Status already saved");
            self.mark_available(&status.id, true);
            self.publish();
            return Ok(());
        }

        if let Err(e) = self.storage.store(status).await {
            tracing::warn!(id = %status.id, error = %e, "Save failed");
            return Err(e.into());
        }

        self.mark_available(&status.id, true);
        self.saved.push(status.with_saved(true));
        tracing::info!(id = %status.id, saved = self.saved.len(), "Saved status");
        self.publish();
        Ok(())
    }

    /// Remove the saved entry for `id` and clear the available entry's flag.
    ///
    /// Deleting an id that is not saved succeeds without changing anything.
    pub async fn delete_status(&mut self, id: &str) -> StoreResult<()> {
        let Some(index) = self.saved.iter().position(|s| s.id == id) else {
            tracing::info!(id, "Delete of unsaved status ignored");
            return Ok(());
        };

        if let Err(e) = self.storage.remove(&self.saved[index]).await {
            tracing::warn!(id, error = %e, "Delete failed");
            return Err(e.into());
        }

        self.saved.remove(index);
        self.mark_available(id, false);
        tracing::info!(id, saved = self.saved.len(), "Deleted status");
        self.publish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::media::{MockDiscovery, SimulatedStorage};
    use crate::models::MediaType;
    use crate::store::error::{DiscoveryError, StorageError, StoreError};

    /// Discovery that fails while `failing` is set, otherwise returns `batch`
    struct ScriptedDiscovery {
        batch: Vec<Status>,
        failing: AtomicBool,
    }

    #[async_trait]
    impl MediaDiscovery for ScriptedDiscovery {
        async fn discover(&self) -> Result<Vec<Status>, DiscoveryError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(DiscoveryError::Unavailable("offline".into()))
            } else {
                Ok(self.batch.clone())
            }
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl MediaStorage for FailingStorage {
        async fn store(&self, _status: &Status) -> Result<(), StorageError> {
            Err(StorageError::PermissionDenied)
        }
        async fn remove(&self, _status: &Status) -> Result<(), StorageError> {
            Err(StorageError::PermissionDenied)
        }
    }

    /// Stores succeed; removals fail with an I/O error
    struct ReadOnlyRemoval;

    #[async_trait]
    impl MediaStorage for ReadOnlyRemoval {
        async fn store(&self, _status: &Status) -> Result<(), StorageError> {
            Ok(())
        }
        async fn remove(&self, _status: &Status) -> Result<(), StorageError> {
            Err(StorageError::Io("disk".into()))
        }
    }

    /// Storage that only counts calls
    #[derive(Default)]
    struct CountingStorage {
        stores: AtomicUsize,
        removes: AtomicUsize,
    }

    #[async_trait]
    impl MediaStorage for CountingStorage {
        async fn store(&self, _status: &Status) -> Result<(), StorageError> {
            self.stores.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn remove(&self, _status: &Status) -> Result<(), StorageError> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Discovery that records the published loading flag while it runs
    #[derive(Default)]
    struct LoadingWatcher {
        rx: Mutex<Option<watch::Receiver<StoreSnapshot>>>,
        loading_during_discover: Mutex<Option<bool>>,
    }

    #[async_trait]
    impl MediaDiscovery for LoadingWatcher {
        async fn discover(&self) -> Result<Vec<Status>, DiscoveryError> {
            let seen = self
                .rx
                .lock()
                .unwrap()
                .as_ref()
                .map(|rx| rx.borrow().is_loading);
            *self.loading_during_discover.lock().unwrap() = seen;
            Ok(vec![status("a")])
        }
    }

    fn status(id: &str) -> Status {
        Status {
            id: id.to_string(),
            media_type: MediaType::Image,
            thumbnail: format!("thumb/{}", id),
            full_url: format!("full/{}", id),
            file_name: format!("{}.jpg", id),
            timestamp: 1_700_000_000_000,
            size: 1_000_000,
            is_saved: false,
        }
    }

    fn mock_store() -> StatusStore {
        StatusStore::new(
            Arc::new(MockDiscovery::seeded(3).with_delay(Duration::ZERO)),
            Arc::new(SimulatedStorage::instant()),
        )
    }

    fn count_saved(store: &StatusStore, id: &str) -> usize {
        store.saved().iter().filter(|s| s.id == id).count()
    }

    #[tokio::test]
    async fn test_fetched_statuses_start_unsaved() {
        let mut store = mock_store();
        let count = store.fetch_statuses().await.unwrap();
        assert_eq!(count, 20);
        assert!(store.statuses().iter().all(|s| !s.is_saved));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_clears_saved_flag_from_discovery() {
        let mut preset = status("a");
        preset.is_saved = true;
        let discovery = ScriptedDiscovery {
            batch: vec![preset],
            failing: AtomicBool::new(false),
        };
        let mut store = StatusStore::new(Arc::new(discovery), Arc::new(SimulatedStorage::instant()));
        store.fetch_statuses().await.unwrap();
        assert!(!store.statuses()[0].is_saved);
    }

    #[tokio::test]
    async fn test_save_adds_single_saved_entry() {
        let mut store = mock_store();
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[2].clone();

        store.save_status(&target).await.unwrap();

        assert_eq!(count_saved(&store, &target.id), 1);
        assert!(store.saved()[0].is_saved);
        let available = store.statuses().iter().find(|s| s.id == target.id).unwrap();
        assert!(available.is_saved);
    }

    #[tokio::test]
    async fn test_save_twice_is_idempotent() {
        let mut store = mock_store();
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[0].clone();

        store.save_status(&target).await.unwrap();
        store.save_status(&target).await.unwrap();

        assert_eq!(store.saved().len(), 1);
        assert_eq!(count_saved(&store, &target.id), 1);
    }

    #[tokio::test]
    async fn test_save_outside_available_collection() {
        let mut store = mock_store();
        let outsider = status("elsewhere");

        store.save_status(&outsider).await.unwrap();

        assert_eq!(count_saved(&store, "elsewhere"), 1);
        assert!(store.statuses().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_and_resets_flag() {
        let mut store = mock_store();
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[4].clone();
        store.save_status(&target).await.unwrap();

        store.delete_status(&target.id).await.unwrap();

        assert_eq!(count_saved(&store, &target.id), 0);
        assert!(store
            .statuses()
            .iter()
            .filter(|s| s.id == target.id)
            .all(|s| !s.is_saved));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let mut store = mock_store();
        store.fetch_statuses().await.unwrap();
        let kept = store.statuses()[1].clone();
        store.save_status(&kept).await.unwrap();
        let before = store.snapshot();

        store.delete_status("status-999").await.unwrap();

        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_fetch_replaces_available_and_keeps_saved() {
        let discovery = Arc::new(ScriptedDiscovery {
            batch: vec![status("x"), status("y")],
            failing: AtomicBool::new(false),
        });
        let mut store = StatusStore::new(discovery, Arc::new(SimulatedStorage::instant()));
        store.save_status(&status("old")).await.unwrap();

        store.fetch_statuses().await.unwrap();
        store.fetch_statuses().await.unwrap();

        let ids: Vec<_> = store.statuses().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(store.saved().len(), 1);
        assert_eq!(store.saved()[0].id, "old");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_batch() {
        let discovery = Arc::new(ScriptedDiscovery {
            batch: vec![status("x")],
            failing: AtomicBool::new(false),
        });
        let mut store = StatusStore::new(discovery.clone(), Arc::new(SimulatedStorage::instant()));
        store.fetch_statuses().await.unwrap();

        discovery.failing.store(true, Ordering::SeqCst);
        let err = store.fetch_statuses().await.unwrap_err();

        assert!(matches!(err, StoreError::Discovery(DiscoveryError::Unavailable(_))));
        assert_eq!(store.statuses().len(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_storage_leaves_collections_unchanged() {
        let mut store = StatusStore::new(
            Arc::new(MockDiscovery::seeded(1).with_delay(Duration::ZERO)),
            Arc::new(FailingStorage),
        );
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[0].clone();
        let before = store.snapshot();

        let err = store.save_status(&target).await.unwrap_err();

        assert_eq!(err, StoreError::Storage(StorageError::PermissionDenied));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_quota_error_surfaces_as_storage_error() {
        let mut store = StatusStore::new(
            Arc::new(MockDiscovery::seeded(1).with_delay(Duration::ZERO)),
            Arc::new(SimulatedStorage::instant().with_quota(10)),
        );
        let err = store.save_status(&status("big")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::InsufficientSpace { .. })
        ));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_snapshot() {
        let mut store = mock_store();
        let rx = store.subscribe();
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[0].clone();
        store.save_status(&target).await.unwrap();

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.statuses.len(), 20);
        assert_eq!(snapshot.saved.len(), 1);
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.find(&target.id).map(|s| s.is_saved), Some(true));
    }

    #[tokio::test]
    async fn test_save_then_delete_scenario() {
        let mut store = mock_store();
        store.fetch_statuses().await.unwrap();
        assert_eq!(store.statuses().len(), 20);

        let target = store
            .statuses()
            .iter()
            .find(|s| s.id == "status-3")
            .cloned()
            .unwrap();
        store.save_status(&target).await.unwrap();
        assert_eq!(store.saved().len(), 1);
        assert_eq!(store.saved()[0].id, "status-3");
        assert!(store.saved()[0].is_saved);

        store.delete_status("status-3").await.unwrap();
        assert!(store.saved().is_empty());
        let available = store.statuses().iter().find(|s| s.id == "status-3").unwrap();
        assert!(!available.is_saved);
    }

    #[tokio::test]
    async fn test_loading_flag_published_during_fetch() {
        let discovery = Arc::new(LoadingWatcher::default());
        let mut store = StatusStore::new(discovery.clone(), Arc::new(SimulatedStorage::instant()));
        let rx = store.subscribe();
        *discovery.rx.lock().unwrap() = Some(store.subscribe());

        store.fetch_statuses().await.unwrap();

        assert_eq!(*discovery.loading_during_discover.lock().unwrap(), Some(true));
        assert!(!rx.borrow().is_loading);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_collections_unchanged() {
        let mut store = StatusStore::new(
            Arc::new(MockDiscovery::seeded(2).with_delay(Duration::ZERO)),
            Arc::new(ReadOnlyRemoval),
        );
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[2].clone();
        store.save_status(&target).await.unwrap();
        let before = store.snapshot();

        let err = store.delete_status(&target.id).await.unwrap_err();

        assert_eq!(err, StoreError::Storage(StorageError::Io("disk".into())));
        assert_eq!(store.snapshot(), before);
        assert_eq!(count_saved(&store, &target.id), 1);
        assert_eq!(store.snapshot().find(&target.id).map(|s| s.is_saved), Some(true));
    }

    #[tokio::test]
    async fn test_repeat_save_skips_storage() {
        let storage = Arc::new(CountingStorage::default());
        let mut store = StatusStore::new(
            Arc::new(MockDiscovery::seeded(4).with_delay(Duration::ZERO)),
            storage.clone(),
        );
        store.fetch_statuses().await.unwrap();
        let target = store.statuses()[0].clone();

        store.save_status(&target).await.unwrap();
        store.save_status(&target).await.unwrap();
        store.delete_status("status-999").await.unwrap();

        assert_eq!(storage.stores.load(Ordering::SeqCst), 1);
        assert_eq!(storage.removes.load(Ordering::SeqCst), 0);
        assert_eq!(store.saved().len(), 1);
    }
}
