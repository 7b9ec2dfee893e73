pub mod config;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod store;

pub use config::{Config, ConfigError, ServerConfig};
pub use observability::{init_observability, Metrics};
pub use services::{DocumentTextExtractor, PriceTable, ShopService, TextExtractor};
pub use store::{InMemoryCache, KeyValueCache};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use handlers::{
    cors_middleware, health_check, metrics_handler, request_validation_middleware,
    security_headers_middleware, ParseState, ShopState,
};
use observability::observability_middleware;

/// Build the application router: shop endpoints at the root, the parse
/// endpoints under /parse, plus health and metrics. Request limits come from
/// the server config: `max_request_size` raises the body-extraction cap above
/// axum's stock limit so whole documents fit, and `request_timeout` bounds
/// every handler.
pub fn create_app(
    metrics: Arc<Metrics>,
    shop_service: Arc<ShopService>,
    extractor: Arc<dyn TextExtractor>,
    server: &ServerConfig,
) -> Router {
    let metrics_for_middleware = metrics.clone();
    let max_request_size = server.max_request_size;

    let shop_state = ShopState {
        shop_service,
        metrics: metrics.clone(),
    };

    let parse_state = ParseState {
        extractor,
        metrics: metrics.clone(),
    };

    Router::new()
        // Metrics endpoint (with metrics state)
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Parse endpoints (with parse state)
        .route("/parse/text", post(handlers::parse_text))
        .route("/parse", get(handlers::parse_hello))
        .route("/parse/", get(handlers::parse_hello))
        .with_state(parse_state)
        // Shop endpoints (with shop state); statics win over the :cid capture
        .route("/", post(handlers::add_client))
        .route(
            "/:cid",
            get(handlers::get_client).delete(handlers::remove_client),
        )
        .route(
            "/cart",
            post(handlers::add_product).delete(handlers::remove_product),
        )
        .route("/cart/:cid", get(handlers::get_products))
        .route("/memory", get(handlers::memory))
        .route("/health/status", get(health_check))
        .with_state(shop_state)
        // Add middleware layers (order matters - outer to inner)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(move |req, next| {
            request_validation_middleware(max_request_size, req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
