use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::observability::Metrics;
use crate::services::{ExtractorError, TextExtractor};

/// State for the parse handlers
#[derive(Clone)]
pub struct ParseState {
    pub extractor: Arc<dyn TextExtractor>,
    pub metrics: Arc<Metrics>,
}

/// Extract plain text from an uploaded PDF or OpenDocument payload. All the
/// actual parsing happens inside the injected extractor.
#[instrument(name = "parse_text", skip(state, headers, payload), fields(payload_len = payload.len()))]
pub async fn parse_text(
    State(state): State<ParseState>,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<String, (StatusCode, Json<Value>)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .unwrap_or_default();

    match state.extractor.extract(&content_type, &payload).await {
        Ok(text) => {
            info!("Extracted {} characters", text.len());
            state.metrics.record_parse_operation(true);
            Ok(text)
        }
        Err(err) => {
            error!("Text extraction failed: {}", err);
            state.metrics.record_parse_operation(false);
            Err(extractor_error_to_response(err))
        }
    }
}

/// Empty probe endpoint: non-wrk measurements (e.g. time to first response)
/// aren't configured to POST a data payload.
#[instrument(name = "parse_hello")]
pub async fn parse_hello() -> &'static str {
    "test"
}

/// Convert ExtractorError to HTTP response
fn extractor_error_to_response(err: ExtractorError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ExtractorError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ExtractorError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    (
        status,
        Json(json!({
            "error": err.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
