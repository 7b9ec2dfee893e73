// Store module - the process-wide key-value cache that acts as the only
// storage in the system.

pub use self::memory::InMemoryCache;

mod memory;

use async_trait::async_trait;

use crate::models::{Client, Product};

/// A record held in the cache, keyed by a string identifier: usernames map to
/// clients, namespaced product ids to products.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Client(Client),
    Product(Product),
}

impl From<Client> for CacheEntry {
    fn from(client: Client) -> Self {
        CacheEntry::Client(client)
    }
}

impl From<Product> for CacheEntry {
    fn from(product: Product) -> Self {
        CacheEntry::Product(product)
    }
}

/// Trait defining the explicit put/get/invalidate cache the shop service runs
/// on. Writes are visible to later reads once `put` returns; there is no
/// atomicity across keys and no grouping of a read-modify-write sequence, so
/// concurrent cart mutations for the same client can lose updates. That is
/// accepted benchmark-grade behavior, not something callers may rely on.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Look up an entry by key. A key never written (or already invalidated)
    /// is a miss.
    async fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Store an entry under a key, replacing any previous value.
    async fn put(&self, key: String, entry: CacheEntry);

    /// Drop an entry. Absent keys are a no-op.
    async fn invalidate(&self, key: &str);

    /// Number of live entries
    async fn len(&self) -> usize;

    /// Remove every entry (test/reset hook)
    async fn clear(&self);
}
