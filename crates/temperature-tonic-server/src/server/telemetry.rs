//! # Telemetry
//!
//! Logging for the temperature converter, plus optional OpenTelemetry export
//! of RPC spans and per-method metrics to Honeycomb or stdout.
//!
//! Log output always goes through a `tracing-subscriber` fmt layer filtered by
//! `RUST_LOG` (default `info`). Conversions log at `debug`, rejected calls at
//! `warn`.
//!
//! ## Feature matrix
//!
//! - `tracing` (default): one span per `FahrenheitToCelsius` /
//!   `CelsiusToFahrenheit` call, carrying the request value, exported through
//!   `tracing-opentelemetry`.
//! - `metrics`: the `requests` and `errors` counters and the
//!   `request_duration` histogram (milliseconds). All are keyed by
//!   `rpc.method`; `errors` also carries `rpc.grpc.status_code`. Without this
//!   feature the recording helpers compile to no-ops.
//! - `honeycomb`: OTLP export over tonic, configured by `HONEYCOMB_API_KEY`,
//!   `HONEYCOMB_DATASET`, `HONEYCOMB_ENDPOINT` and `HONEYCOMB_COMPRESSION`.
//! - `stdout`: prints spans and metrics to stdout.
//!
//! Exporters require `tracing` or `metrics`; both exporters may be enabled
//! at once, each with its own metrics reader. Events outside a span are only
//! logged, not exported.
//!
//! ## Example usage
//!
//! Enable tracing and export to Honeycomb:
//!
//! ```bash
//! cargo run --features tracing,honeycomb
//! ```
//!
//! Enable metrics and export to Honeycomb:
//!
//! ```bash
//! cargo run --features metrics,honeycomb
//! ```
//!
//! Enable tracing and metrics, exported to both Honeycomb and stdout:
//!
//! ```bash
//! cargo run --features tracing,metrics,honeycomb,stdout
//! ```
//!
//! Enable only local stdout export (no remote backend):
//!
//! ```bash
//! cargo run --features tracing,stdout
//! ```

// Disallow using `honeycomb` without `tracing` or `metrics`
#[cfg(all(
    feature = "honeycomb",
    not(any(feature = "tracing", feature = "metrics"))
))]
compile_error!(
    "The 'honeycomb' feature requires at least one of 'tracing' or 'metrics' to be enabled."
);

// Disallow using `stdout` without `tracing` or `metrics`
#[cfg(all(feature = "stdout", not(any(feature = "tracing", feature = "metrics"))))]
compile_error!(
    "The 'stdout' feature requires at least one of 'tracing' or 'metrics' to be enabled."
);

// Core imports - always needed
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Honeycomb-specific imports
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "tracing")))]
use opentelemetry_otlp::{Compression, Protocol, WithExportConfig, WithTonicConfig};
#[cfg(all(feature = "honeycomb", feature = "metrics"))]
use opentelemetry_sdk::metrics::Temporality;
#[cfg(feature = "honeycomb")]
use tonic::metadata::MetadataMap;
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "tracing")))]
use tonic::transport::ClientTlsConfig;

// Metrics-specific imports
#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Histogram, Meter};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::metrics as sdkmetrics;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

// Either
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry::{InstrumentationScope, KeyValue};
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry_sdk::Resource;
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry_semantic_conventions as semvcns;

// Tracing-specific imports
#[cfg(feature = "tracing")]
use opentelemetry::trace::TracerProvider;
#[cfg(feature = "tracing")]
use opentelemetry_sdk::propagation::TraceContextPropagator;
#[cfg(feature = "tracing")]
use opentelemetry_sdk::trace as sdktrace;

/// Service name reported on every exported span and metric.
pub const SERVICE_NAME: &str = "temperature-converter";

/// Exporter handles that must outlive the server so buffered data can be
/// flushed on shutdown.
pub struct TelemetryProviders {
    #[cfg(feature = "tracing")]
    pub tracer_provider: sdktrace::SdkTracerProvider,
    #[cfg(feature = "metrics")]
    pub meter_provider: sdkmetrics::SdkMeterProvider,
}

/// Installs the global `tracing` subscriber and any enabled OpenTelemetry
/// providers.
///
/// # Errors
///
/// Fails if an exporter cannot be built or the `honeycomb` environment is
/// incomplete.
pub fn init_telemetry() -> anyhow::Result<TelemetryProviders> {
    #[cfg(feature = "tracing")]
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    #[cfg(feature = "tracing")]
    let tracer_provider = init_tracer()?;

    #[cfg(feature = "metrics")]
    let meter_provider = init_metrics()?;

    #[cfg(any(feature = "metrics", feature = "tracing"))]
    let scope = InstrumentationScope::builder(SERVICE_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(semvcns::SCHEMA_URL)
        .build();

    // Always subscribe to standard tracing logs printed to the console via
    // `tracing_subscriber::fmt`. This is unrelated to the `opentelemetry_stdout`
    // exporter - it logs spans/events as human-readable output.
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        );

    #[cfg(feature = "tracing")]
    let registry = {
        opentelemetry::global::set_tracer_provider(tracer_provider.clone());
        registry.with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer_provider.tracer_with_scope(scope.clone()))
                .with_error_records_to_exceptions(true),
        )
    };

    #[cfg(feature = "metrics")]
    let registry = {
        opentelemetry::global::set_meter_provider(meter_provider.clone());
        let meter = opentelemetry::global::meter_with_scope(scope);
        init_metric_handles(meter);

        registry.with(tracing_opentelemetry::MetricsLayer::new(
            meter_provider.clone(),
        ))
    };

    registry.init();

    Ok(TelemetryProviders {
        #[cfg(feature = "tracing")]
        tracer_provider,
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

#[cfg(feature = "honeycomb")]
fn get_metadata() -> anyhow::Result<MetadataMap> {
    use anyhow::Context;

    let mut map = MetadataMap::new();
    let api_key = std::env::var("HONEYCOMB_API_KEY").context("missing `HONEYCOMB_API_KEY`")?;
    let dataset = std::env::var("HONEYCOMB_DATASET").context("missing `HONEYCOMB_DATASET`")?;
    map.insert(
        "x-honeycomb-team",
        api_key.parse().context("invalid API key")?,
    );
    map.insert(
        "x-honeycomb-dataset",
        dataset.parse().context("invalid dataset")?,
    );
    Ok(map)
}

#[cfg(any(feature = "metrics", feature = "tracing"))]
fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_schema_url(
            [KeyValue::new(
                semvcns::resource::SERVICE_VERSION,
                env!("CARGO_PKG_VERSION"),
            )],
            semvcns::SCHEMA_URL,
        )
        .build()
}

#[cfg(feature = "metrics")]
fn init_metrics() -> anyhow::Result<sdkmetrics::SdkMeterProvider> {
    let builder = sdkmetrics::SdkMeterProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        use opentelemetry_stdout::MetricExporter;
        let exporter = MetricExporter::default();
        let reader = opentelemetry_sdk::metrics::PeriodicReader::builder(exporter)
            .with_interval(std::time::Duration::from_secs(5))
            .build();

        builder.with_reader(reader)
    };

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let metadata = get_metadata()?;
        let endpoint =
            std::env::var("HONEYCOMB_ENDPOINT").context("missing `HONEYCOMB_ENDPOINT`")?;
        let compression = {
            use std::str::FromStr;
            let raw = std::env::var("HONEYCOMB_COMPRESSION")
                .context("missing `HONEYCOMB_COMPRESSION`")?
                .to_ascii_lowercase();
            Compression::from_str(&raw)?
        };
        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_tls_config(ClientTlsConfig::new().with_native_roots())
            .with_metadata(metadata)
            .with_timeout(std::time::Duration::from_secs(10))
            .with_compression(compression)
            .with_endpoint(endpoint)
            .with_protocol(Protocol::Grpc)
            .with_temporality(Temporality::Delta)
            .build()
            .context("failed to build metrics exporter")?;

        builder.with_periodic_exporter(exporter)
    };

    Ok(builder.build())
}

#[cfg(feature = "tracing")]
fn init_tracer() -> anyhow::Result<sdktrace::SdkTracerProvider> {
    let builder = sdktrace::SdkTracerProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        use opentelemetry_stdout::SpanExporter;
        let exporter = SpanExporter::default();
        let batch = sdktrace::BatchSpanProcessor::builder(exporter)
            .with_batch_config(
                sdktrace::BatchConfigBuilder::default()
                    .with_scheduled_delay(std::time::Duration::from_secs(5))
                    .with_max_queue_size(2048)
                    .build(),
            )
            .build();
        builder.with_span_processor(batch)
    };

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let metadata = get_metadata()?;
        let endpoint =
            std::env::var("HONEYCOMB_ENDPOINT").context("missing `HONEYCOMB_ENDPOINT`")?;
        let compression = {
            use std::str::FromStr;
            let raw = std::env::var("HONEYCOMB_COMPRESSION")
                .context("missing `HONEYCOMB_COMPRESSION`")?
                .to_ascii_lowercase();
            Compression::from_str(&raw)?
        };
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_tls_config(ClientTlsConfig::new().with_native_roots())
            .with_metadata(metadata)
            .with_timeout(std::time::Duration::from_secs(10))
            .with_compression(compression)
            .with_endpoint(endpoint)
            .with_protocol(Protocol::Grpc)
            .build()
            .context("failed to build tracer exporter")?;

        let batch = sdktrace::BatchSpanProcessor::builder(exporter)
            .with_batch_config(
                sdktrace::BatchConfigBuilder::default()
                    .with_scheduled_delay(std::time::Duration::from_secs(5))
                    .with_max_queue_size(2048)
                    .build(),
            )
            .build();

        builder.with_span_processor(batch)
    };

    Ok(builder.build())
}

impl TelemetryProviders {
    /// Flushes and shuts down every provider. Failures are reported on stderr
    /// since the subscriber may already be unusable.
    pub fn shutdown(self) {
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = self.tracer_provider.force_flush() {
                eprintln!("Error flushing traces: {err:#?}");
            }
            if let Err(err) = self.tracer_provider.shutdown() {
                eprintln!("Error shutting down tracer: {err:#?}");
            }
        }

        #[cfg(feature = "metrics")]
        {
            if let Err(err) = self.meter_provider.force_flush() {
                eprintln!("Error flushing metrics: {err:#?}");
            }
            if let Err(err) = self.meter_provider.shutdown() {
                eprintln!("Error shutting down meter: {err:#?}");
            }
        }
    }
}

// Metric handles - only compiled when metrics feature is enabled
#[cfg(feature = "metrics")]
static REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static REQUEST_ERRORS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static REQUEST_DURATION_MS: OnceLock<Histogram<f64>> = OnceLock::new();

#[cfg(feature = "metrics")]
fn init_metric_handles(meter: Meter) {
    let _ = REQUESTS.set(
        meter
            .u64_counter("requests")
            .with_description("Total conversion requests")
            .build(),
    );

    let _ = REQUEST_ERRORS.set(
        meter
            .u64_counter("errors")
            .with_description("Rejected conversion requests")
            .build(),
    );

    let _ = REQUEST_DURATION_MS.set(
        meter
            .f64_histogram("request_duration")
            .with_unit("ms")
            .with_description("Server-side handling time per conversion")
            .build(),
    );
}

// Convenience functions that compile to no-ops when metrics are disabled
#[cfg(feature = "metrics")]
pub fn increment_requests(method: &'static str) {
    if let Some(counter) = REQUESTS.get() {
        counter.add(1, &[KeyValue::new(semvcns::attribute::RPC_METHOD, method)]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_requests(_method: &'static str) {}

#[cfg(feature = "metrics")]
pub fn increment_request_errors(method: &'static str, code: tonic::Code) {
    if let Some(counter) = REQUEST_ERRORS.get() {
        counter.add(
            1,
            &[
                KeyValue::new(semvcns::attribute::RPC_METHOD, method),
                KeyValue::new(
                    semvcns::attribute::RPC_GRPC_STATUS_CODE,
                    i64::from(code as i32),
                ),
            ],
        );
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_request_errors(_method: &'static str, _code: tonic::Code) {}

#[cfg(feature = "metrics")]
pub fn record_request_duration(method: &'static str, duration_ms: f64) {
    if let Some(histogram) = REQUEST_DURATION_MS.get() {
        histogram.record(
            duration_ms,
            &[KeyValue::new(semvcns::attribute::RPC_METHOD, method)],
        );
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_request_duration(_method: &'static str, _duration_ms: f64) {}
