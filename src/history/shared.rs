//! Shared history handle

use super::{load_events_json, HistoricalEvent, HistoricalStore, HistorySource};
use crate::config::ModelConfig;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Historical store shared between concurrent prediction sessions
///
/// Readers take a snapshot and keep using it even if a reload lands
/// mid-prediction; reloads build the new store before taking the write lock.
#[derive(Debug, Clone)]
pub struct SharedHistory {
    config: ModelConfig,
    store: Arc<RwLock<Arc<HistoricalStore>>>,
}

impl SharedHistory {
    /// Create an empty shared store
    pub fn new(config: ModelConfig) -> Self {
        let store = HistoricalStore::new(config.clone());
        Self {
            config,
            store: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// Wrap an already populated store
    pub fn from_store(store: HistoricalStore, config: ModelConfig) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(Arc::new(store))),
        }
    }
}

#[async_trait]
impl HistorySource for SharedHistory {
    async fn snapshot(&self) -> Arc<HistoricalStore> {
        let store = self.store.read().await;
        Arc::clone(&store)
    }

    async fn replace(&self, events: Vec<HistoricalEvent>) -> usize {
        let fresh = Arc::new(HistoricalStore::with_events(self.config.clone(), events));
        let count = fresh.len();

        let mut store = self.store.write().await;
        *store = fresh;
        count
    }

    async fn refresh_from(&self, path: &Path) -> anyhow::Result<usize> {
        let events = load_events_json(path).await?;
        Ok(self.replace(events).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;

    fn events(n: u64) -> Vec<HistoricalEvent> {
        (0..n)
            .map(|i| HistoricalEvent::new(EventCategory::FoodFestival, "Praha", 1000 + i, 250, None))
            .collect()
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let shared = SharedHistory::new(ModelConfig::default());
        assert!(shared.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_replace() {
        let shared = SharedHistory::new(ModelConfig::default());
        shared.replace(events(3)).await;

        let before = shared.snapshot().await;
        let count = shared.replace(events(5)).await;

        assert_eq!(count, 5);
        assert_eq!(before.len(), 3);
        assert_eq!(shared.snapshot().await.len(), 5);
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let shared = SharedHistory::new(ModelConfig::default());
        let other = shared.clone();

        other.replace(events(2)).await;
        assert_eq!(shared.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_readers_see_whole_datasets() {
        let shared = SharedHistory::new(ModelConfig::default());
        shared.replace(events(4)).await;

        let writer = {
            let shared = shared.clone();
            tokio::spawn(async move {
                for _ in 0..20 {
                    shared.replace(events(8)).await;
                    shared.replace(events(4)).await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let shared = shared.clone();
            readers.push(tokio::spawn(async move {
                for _ in 0..50 {
                    let len = shared.snapshot().await.len();
                    assert!(len == 4 || len == 8, "partial dataset of {len} records");
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }

    #[test]
    fn test_from_store_blocking() {
        let store = HistoricalStore::with_events(ModelConfig::default(), events(2));
        let shared = SharedHistory::from_store(store, ModelConfig::default());
        let len = tokio_test::block_on(async { shared.snapshot().await.len() });
        assert_eq!(len, 2);
    }
}
