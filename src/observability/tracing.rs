use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install the global logging subscriber. `RUST_LOG` wins when set; otherwise
/// the service and tower_http log at info.
pub fn init_observability(
    service_name: &str,
    enable_json_logging: bool,
) -> Result<(), ObservabilityError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tower_http=info",
            service_name.replace('-', "_")
        ))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::NONE);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if enable_json_logging {
        registry
            .with(
                fmt_layer
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };
    result.map_err(|e| ObservabilityError::TracingInit(e.to_string()))?;

    info!(service = service_name, "Observability initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_instead_of_panicking() {
        // Only one global subscriber can win
        let first = init_observability("shopcart-test", false);
        let second = init_observability("shopcart-test", true);
        assert!(first.is_ok() || second.is_err());
    }
}
