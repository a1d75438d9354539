//! Tracing subscriber installation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::ObservabilityError;

/// Noisy dependencies are capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &str = "h2=warn,hyper=warn,tower=warn,tonic=warn,opentelemetry=warn,sqlx=warn";

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let service_name = &config.observability.otel_service_name;

    match config.logging.log_format {
        LogFormat::Compact => install(
            &config.logging,
            service_name,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            tracer_provider,
        ),
        LogFormat::Json => install(
            &config.logging,
            service_name,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            tracer_provider,
        ),
    }
}

fn default_directives(logging: &LoggingConfig) -> String {
    format!("{},{QUIET_TARGETS}", logging.log_level)
}

fn install<L>(
    logging: &LoggingConfig,
    service_name: &str,
    fmt_layer: L,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(logging)));

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    if let Some(tracer_provider) = tracer_provider {
        let tracer = tracer_provider.tracer(service_name.to_owned());

        subscriber
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}
