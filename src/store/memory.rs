use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CacheEntry, KeyValueCache};

/// In-memory implementation of the cache: an unordered map with no eviction,
/// no size bound, and no durability across restarts.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    async fn put(&self, key: String, entry: CacheEntry) {
        debug!(key = %key, "cache put");
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    async fn invalidate(&self, key: &str) {
        debug!(key = %key, "cache invalidate");
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }

    async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.len()
    }

    async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}
