use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{derive_price, Client, Product};
use crate::store::{CacheEntry, KeyValueCache};

use super::PriceTable;

/// Application-scoped shop state: the key-value cache holding clients and
/// products, the static price table, and the counter used to name anonymous
/// clients. The cache follows the write-populates / delete-invalidates /
/// get-is-cache-only pattern of the original annotation-driven service.
pub struct ShopService {
    cache: Arc<dyn KeyValueCache>,
    prices: Arc<PriceTable>,
    anonymous_clients: AtomicU32,
}

impl ShopService {
    pub fn new(cache: Arc<dyn KeyValueCache>, prices: Arc<PriceTable>) -> Self {
        Self {
            cache,
            prices,
            anonymous_clients: AtomicU32::new(0),
        }
    }

    /// 1-based number for the next client added without an explicit username.
    /// Strictly increasing for the process lifetime.
    pub fn next_anonymous_client(&self) -> u32 {
        self.anonymous_clients.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Cache-only lookup: a client never added (or since destroyed) is a miss.
    pub async fn get_client(&self, username: &str) -> Option<Client> {
        match self.cache.get(username).await {
            Some(CacheEntry::Client(client)) => Some(client),
            _ => None,
        }
    }

    /// Create a client with an empty cart and populate the cache under its
    /// username.
    #[instrument(skip(self))]
    pub async fn add_client(&self, username: &str, name: &str) -> Client {
        let client = Client::new(username, name);
        self.cache
            .put(username.to_string(), client.clone().into())
            .await;
        info!("Client stored");
        client
    }

    /// Advance the client's cart counters and write the client back. The
    /// read-modify-write is not atomic across concurrent callers; lost cart
    /// updates are accepted benchmark behavior.
    pub async fn add_product_to_cart(&self, mut client: Client) -> Client {
        client.cart.add_product();
        self.cache
            .put(client.username.clone(), client.clone().into())
            .await;
        client
    }

    /// Drop one product from the client's count and write the client back.
    pub async fn remove_product_from_cart(&self, mut client: Client) -> Client {
        client.cart.remove_product();
        self.cache
            .put(client.username.clone(), client.clone().into())
            .await;
        client
    }

    /// Invalidate only; the entry simply disappears from the cache.
    #[instrument(skip(self))]
    pub async fn destroy_client(&self, username: &str) {
        self.cache.invalidate(username).await;
        info!("Client invalidated");
    }

    /// Cache-only lookup by namespaced product id.
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        match self.cache.get(id).await {
            Some(CacheEntry::Product(product)) => Some(product),
            _ => None,
        }
    }

    /// Build a product with the synthetic price rule and populate the cache
    /// under its id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, id: &str, name: &str, amount: u32) -> Product {
        let product = Product::new(id, name, amount, derive_price(id));
        self.cache.put(id.to_string(), product.clone().into()).await;
        product
    }

    pub async fn destroy_product(&self, id: &str) {
        self.cache.invalidate(id).await;
    }

    /// Static price table loaded at startup. Not consulted by the pricing
    /// rule; exposed for diagnostics.
    pub fn price_table(&self) -> &PriceTable {
        &self.prices
    }

    /// Number of live cache entries (clients plus products)
    pub async fn cache_entries(&self) -> usize {
        self.cache.len().await
    }

    /// Drop all state and restart the anonymous-client numbering. Test hook;
    /// the running service never calls this.
    pub async fn reset(&self) {
        self.cache.clear().await;
        self.anonymous_clients.store(0, Ordering::Relaxed);
    }
}
