//! Mock status discovery - synthesizes a batch of statuses after a delay

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{FETCH_DELAY_MS, MOCK_BATCH_SIZE};
use crate::media::MediaDiscovery;
use crate::models::{MediaType, Status};
use crate::store::error::DiscoveryError;

const VIDEO_PROBABILITY: f64 = 0.3;
const MIN_SIZE: u64 = 500_000;
const SIZE_SPREAD: u64 = 5_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Discovery that generates random images and videos.
///
/// Ids are stable across fetches (`status-1` .. `status-N`), so a status
/// saved from one batch matches the same id in the next.
pub struct MockDiscovery {
    batch_size: usize,
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockDiscovery {
    pub fn new() -> Self {
        MockDiscovery {
            batch_size: MOCK_BATCH_SIZE,
            delay: Duration::from_millis(FETCH_DELAY_MS),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic output for a given seed
    pub fn seeded(seed: u64) -> Self {
        MockDiscovery {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    fn generate(&self, now_ms: i64) -> Vec<Status> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (1..=self.batch_size)
            .map(|i| {
                let media_type = if rng.gen_bool(VIDEO_PROBABILITY) {
                    MediaType::Video
                } else {
                    MediaType::Image
                };
                Status {
                    id: format!("status-{}", i),
                    media_type,
                    thumbnail: format!("https://picsum.photos/300/400?random={}", i),
                    full_url: format!("https://picsum.photos/800/1200?random={}", i),
                    file_name: format!("status_{}.{}", i, media_type.extension()),
                    timestamp: now_ms - rng.gen_range(0..DAY_MS),
                    size: MIN_SIZE + rng.gen_range(0..SIZE_SPREAD),
                    is_saved: false,
                }
            })
            .collect()
    }
}

impl Default for MockDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaDiscovery for MockDiscovery {
    async fn discover(&self) -> Result<Vec<Status>, DiscoveryError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let statuses = self.generate(chrono::Utc::now().timestamp_millis());
        tracing::debug!(count = statuses.len(), "Discovered statuses");
        Ok(statuses)
    }
}
