//! Router assembly and graceful shutdown.
//!
//! [`serve_with_incoming`] wires the temperature service together with the
//! standard health and reflection services, gRPC-web, CORS and compression,
//! and runs it on any stream of accepted connections (TCP, Unix socket, or
//! an in-process listener in tests).

use crate::server::{config::ServerConfig, service::handler::TemperatureService};
use core::future::Future;
use futures::Stream;
use temperature_tonic_core::proto::{
    FILE_DESCRIPTOR_SET, temperature_converter_server::TemperatureConverterServer,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_health::{ServingStatus, server::HealthReporter};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Serves the temperature converter on `incoming` until `signal` resolves.
///
/// Health reports `SERVING` for both the overall server (`""`) and
/// `temperature.TemperatureConverter` before the first connection is
/// accepted. Once `signal` resolves both flip to `NOT_SERVING`, new
/// conversions are refused with `UNAVAILABLE`, and after
/// [`ServerConfig::shutdown_grace`] the listener closes and in-flight calls
/// drain.
///
/// # Errors
///
/// Returns an error if TLS material cannot be loaded, the reflection service
/// cannot be built, or the transport fails.
pub async fn serve_with_incoming<I, IO, IE, F>(
    incoming: I,
    config: ServerConfig,
    signal: F,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_service_status("", ServingStatus::Serving)
        .await;
    health_reporter
        .set_serving::<TemperatureConverterServer<TemperatureService>>()
        .await;

    let service = TemperatureService::new();

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let mut builder = Server::builder();
    if let Some(tls) = &config.tls {
        builder = builder.tls_config(tls.load().await?)?;
    }

    builder
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_temperature_service(service.clone()))
        .serve_with_incoming_shutdown(
            incoming,
            drain(signal, service, health_reporter, config),
        )
        .await?;

    #[cfg(feature = "tracing")]
    tracing::info!("Service shut down successfully");
    Ok(())
}

fn build_temperature_service(
    service: TemperatureService,
) -> TemperatureConverterServer<TemperatureService> {
    TemperatureConverterServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}

async fn drain<F: Future<Output = ()>>(
    signal: F,
    service: TemperatureService,
    health_reporter: HealthReporter,
    config: ServerConfig,
) {
    signal.await;

    #[cfg(feature = "tracing")]
    tracing::info!("Shutdown signal received, terminating gracefully...");

    // 1. Refuse new conversions
    service.shutdown();

    // 2. Publish the status; the named service flips last so observing it
    //    implies the steps above are done
    health_reporter
        .set_service_status("", ServingStatus::NotServing)
        .await;
    health_reporter
        .set_not_serving::<TemperatureConverterServer<TemperatureService>>()
        .await;

    // 3. Give clients time to observe the status before the listener closes
    if !config.shutdown_grace.is_zero() {
        #[cfg(feature = "tracing")]
        tracing::info!("Waiting {:?} before closing connections", config.shutdown_grace);
        tokio::time::sleep(config.shutdown_grace).await;
    }
}
