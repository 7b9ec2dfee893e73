use std::sync::Arc;

use reqwest::Client;
use tokio::net::TcpListener;

use shopcart_rs::{
    create_app, DocumentTextExtractor, InMemoryCache, Metrics, PriceTable, ServerConfig,
    ShopService,
};

/// Spawns the real application router on an ephemeral port and hands out a
/// client pointed at it. Each test gets its own isolated in-memory state.
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    pub shop_service: Arc<ShopService>,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics"));
        let cache = Arc::new(InMemoryCache::new());
        let shop_service = Arc::new(ShopService::new(cache, Arc::new(PriceTable::empty())));
        let extractor = Arc::new(DocumentTextExtractor::new());
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_seconds: 30,
            max_request_size: 10 * 1024 * 1024,
        };

        let app = create_app(metrics, shop_service.clone(), extractor, &server);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
            shop_service,
        }
    }

    /// POST a client and return the response body
    pub async fn add_client(&self, body: serde_json::Value) -> String {
        self.client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .expect("send add_client")
            .text()
            .await
            .expect("read body")
    }

    /// POST a product and return the response body
    pub async fn add_product(&self, body: serde_json::Value) -> String {
        self.client
            .post(&format!("{}/cart", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("send add_product")
            .text()
            .await
            .expect("read body")
    }

    /// GET the bracketed product listing for a client
    pub async fn get_products(&self, cid: &str) -> String {
        self.client
            .get(&format!("{}/cart/{}", self.base_url, cid))
            .send()
            .await
            .expect("send get_products")
            .text()
            .await
            .expect("read body")
    }
}
