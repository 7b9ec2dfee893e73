use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{ClientSaveCommand, ProductDeleteCommand, ProductSaveCommand};
use crate::observability::Metrics;
use crate::services::ShopService;

/// State for the shop handlers
#[derive(Clone)]
pub struct ShopState {
    pub shop_service: Arc<ShopService>,
    pub metrics: Arc<Metrics>,
}

// Every shop endpoint answers 200 with a human-readable string body; lookup
// misses come back as formatted error strings, never as error statuses. That
// is the upstream benchmark contract.

/// Create a client, assigning `client<N>` when the caller omits a username.
#[instrument(name = "add_client", skip(state, cmd))]
pub async fn add_client(
    State(state): State<ShopState>,
    Json(cmd): Json<ClientSaveCommand>,
) -> String {
    let username = match cmd.username.clone() {
        Some(username) => username,
        None => format!("client{}", state.shop_service.next_anonymous_client()),
    };
    info!("Adding client: {}", username);

    let client = state.shop_service.add_client(&username, &cmd.name).await;
    state.metrics.record_shop_operation("add_client", true);
    state
        .metrics
        .set_cache_entries(state.shop_service.cache_entries().await);

    client.to_string()
}

/// Look up a client's representation
#[instrument(name = "get_client", skip(state), fields(cid = %cid))]
pub async fn get_client(State(state): State<ShopState>, Path(cid): Path<String>) -> String {
    match state.shop_service.get_client(&cid).await {
        Some(client) => {
            state.metrics.record_shop_operation("get_client", true);
            client.to_string()
        }
        None => {
            state.metrics.record_shop_operation("get_client", false);
            format!("Error, no such client: {}", cid)
        }
    }
}

/// Remove a client, cascading over every product id the cart ever allocated.
/// An absent client just echoes the id.
#[instrument(name = "remove_client", skip(state), fields(cid = %cid))]
pub async fn remove_client(State(state): State<ShopState>, Path(cid): Path<String>) -> String {
    let Some(client) = state.shop_service.get_client(&cid).await else {
        state.metrics.record_shop_operation("remove_client", false);
        return cid;
    };

    // Ids below next_product_id may or may not still be present; destroying an
    // absent one is a no-op.
    for i in 0..client.cart.next_product_id {
        state
            .shop_service
            .destroy_product(&format!("{}${}", cid, i))
            .await;
    }
    state.shop_service.destroy_client(&cid).await;

    info!("Removed client and {} product slots", client.cart.next_product_id);
    state.metrics.record_shop_operation("remove_client", true);
    state
        .metrics
        .set_cache_entries(state.shop_service.cache_entries().await);

    cid
}

/// Add a product to a client's cart. The product id is allocated from the
/// cart's monotonic counter and namespaced under the username.
#[instrument(name = "add_product", skip(state, cmd), fields(username = %cmd.username))]
pub async fn add_product(
    State(state): State<ShopState>,
    Json(cmd): Json<ProductSaveCommand>,
) -> String {
    let Some(client) = state.shop_service.get_client(&cmd.username).await else {
        state.metrics.record_shop_operation("add_product", false);
        return format!("Error, no such client: {}", cmd);
    };

    let product_id = format!("{}${}", cmd.username, client.cart.next_product_id());
    let product = state
        .shop_service
        .create_product(&product_id, &cmd.name, cmd.amount)
        .await;
    state.shop_service.add_product_to_cart(client).await;

    info!("Added product {}", product.id);
    state.metrics.record_shop_operation("add_product", true);
    state
        .metrics
        .set_cache_entries(state.shop_service.cache_entries().await);

    product.to_string()
}

/// List a client's still-present products as a bracketed list in increasing id
/// order. Empty carts render as `[]`.
#[instrument(name = "get_products", skip(state), fields(cid = %cid))]
pub async fn get_products(State(state): State<ShopState>, Path(cid): Path<String>) -> String {
    let Some(client) = state.shop_service.get_client(&cid).await else {
        state.metrics.record_shop_operation("get_products", false);
        return format!("Error, no such client: {}", cid);
    };
    state.metrics.record_shop_operation("get_products", true);

    let mut products = Vec::with_capacity(client.cart.number_products as usize);
    for i in 0..client.cart.next_product_id {
        if let Some(product) = state
            .shop_service
            .get_product(&format!("{}${}", cid, i))
            .await
        {
            products.push(product.to_string());
        }
    }

    format!("[{}]", products.join(", "))
}

/// Remove one product from a client's cart, echoing the product id
#[instrument(name = "remove_product", skip(state, cmd), fields(id = %cmd.id))]
pub async fn remove_product(
    State(state): State<ShopState>,
    Json(cmd): Json<ProductDeleteCommand>,
) -> String {
    let Some(client) = state.shop_service.get_client(&cmd.username).await else {
        state.metrics.record_shop_operation("remove_product", false);
        return format!("Error, no such client: {}", cmd);
    };

    if state.shop_service.get_product(&cmd.id).await.is_none() {
        state.metrics.record_shop_operation("remove_product", false);
        return format!("Error, unable to find product: {}", cmd);
    }

    state.shop_service.remove_product_from_cart(client).await;
    state.shop_service.destroy_product(&cmd.id).await;

    state.metrics.record_shop_operation("remove_product", true);
    state
        .metrics
        .set_cache_entries(state.shop_service.cache_entries().await);

    cmd.id
}

/// Diagnostic endpoint reporting resident memory in kilobytes. The original
/// forced a JVM garbage-collection cycle first; there is no equivalent cycle
/// to trigger here, so this reports VmRSS as-is.
#[instrument(name = "memory")]
pub async fn memory() -> String {
    resident_memory_kb().unwrap_or(0).to_string()
}

fn resident_memory_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}
