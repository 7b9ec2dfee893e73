use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use shopcart_rs::{
    create_app, init_observability, Config, DocumentTextExtractor, InMemoryCache, Metrics,
    PriceTable, ShopService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment().context("failed to load configuration")?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        config.observability.enable_json_logging,
    )?;

    info!("Starting shopcart-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Static price data (best-effort; failures leave the table empty)
    let prices = Arc::new(PriceTable::load(&config.data.static_data_path));

    // Application state: the in-memory cache is the only storage
    let cache = Arc::new(InMemoryCache::new());
    let shop_service = Arc::new(ShopService::new(cache, prices));
    let extractor = Arc::new(DocumentTextExtractor::new());
    info!("Services initialized successfully");

    // Build the application router
    let app = create_app(metrics, shop_service, extractor, &config.server);

    // Create socket address
    let host = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host '{}'", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    info!("Server listening on {}", addr);

    // Create TCP listener
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
