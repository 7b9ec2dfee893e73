use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::ShopState;

/// Liveness probe with a couple of cheap diagnostics: live cache entries and
/// the size of the static price table loaded at startup.
pub async fn health_check(State(state): State<ShopState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "shopcart-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "cache_entries": state.shop_service.cache_entries().await,
        "price_table_entries": state.shop_service.price_table().len(),
    }))
}
