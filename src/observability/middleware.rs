use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use tracing::Instrument;

use super::Metrics;

/// Middleware recording a per-request span plus HTTP metrics. Endpoints are
/// grouped by matched route (e.g. `/cart/:cid`) rather than raw URI so the
/// label set stays bounded.
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| uri.clone());

    let span = tracing::info_span!(
        target: "shopcart_rs::http",
        "request",
        http.method = %method,
        http.route = %endpoint,
        http.url = %uri,
        http.status_code = tracing::field::Empty,
    );

    async {
        metrics.increment_in_flight(&method, &endpoint);

        let response = next.run(request).await;

        let status = response.status().as_u16();
        let duration = start_time.elapsed().as_secs_f64();

        tracing::Span::current().record("http.status_code", u64::from(status));
        metrics.decrement_in_flight(&method, &endpoint);
        metrics.record_http_request(&method, &endpoint, status, duration);

        response
    }
    .instrument(span)
    .await
}
