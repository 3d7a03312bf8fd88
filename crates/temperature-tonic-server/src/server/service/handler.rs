//! gRPC service implementation for temperature conversion.
//!
//! This module defines [`TemperatureService`], the concrete implementation of
//! the [`TemperatureConverter`] gRPC service defined in the protobuf schema.
//!
//! ## Responsibilities
//!
//! - Validate incoming values and map rejections to `INVALID_ARGUMENT`.
//! - Refuse new calls with `UNAVAILABLE` once shutdown has begun.
//! - Emit per-method request, error and latency telemetry.
//!
//! The handlers hold no per-request state, so any number of calls can run
//! concurrently against one (cheaply cloned) service value.

use crate::server::telemetry::{
    increment_request_errors, increment_requests, record_request_duration,
};
use std::time::Instant;
use temperature_tonic_core::{
    Error,
    proto::{
        CelsiusRequest, CelsiusResponse, FahrenheitRequest, FahrenheitResponse,
        temperature_converter_server::TemperatureConverter,
    },
    types::{Celsius, Fahrenheit},
};
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};

const FAHRENHEIT_TO_CELSIUS: &str = "FahrenheitToCelsius";
const CELSIUS_TO_FAHRENHEIT: &str = "CelsiusToFahrenheit";

/// Stateless gRPC service converting between Fahrenheit and Celsius.
///
/// Clones share a single shutdown token; cancelling it through
/// [`TemperatureService::shutdown`] makes every clone reject new calls.
#[derive(Clone, Debug, Default)]
pub struct TemperatureService {
    shutdown_token: CancellationToken,
}

impl TemperatureService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops accepting conversions. Calls already past the readiness check
    /// complete normally.
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    fn ensure_serving(&self) -> Result<(), Error> {
        if self.is_shutting_down() {
            return Err(Error::ServiceShutdown);
        }
        Ok(())
    }
}

/// Records telemetry for a finished call and turns its error into a
/// [`Status`].
fn complete<T>(
    method: &'static str,
    start: Instant,
    result: Result<T, Error>,
) -> Result<T, Status> {
    record_request_duration(method, start.elapsed().as_secs_f64() * 1000.0);
    result.map_err(|err| {
        let status = Status::from(err);
        increment_request_errors(method, status.code());
        #[cfg(feature = "tracing")]
        tracing::warn!("{method} rejected: {}", status.message());
        status
    })
}

#[tonic::async_trait]
impl TemperatureConverter for TemperatureService {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(fahrenheit = req.get_ref().fahrenheit)))]
    async fn fahrenheit_to_celsius(
        &self,
        req: Request<FahrenheitRequest>,
    ) -> Result<Response<CelsiusResponse>, Status> {
        let start = Instant::now();
        increment_requests(FAHRENHEIT_TO_CELSIUS);

        let result = self.ensure_serving().and_then(|()| {
            let fahrenheit = Fahrenheit::new(req.into_inner().fahrenheit)?;
            Ok((fahrenheit, fahrenheit.to_celsius()?))
        });
        let (_fahrenheit, celsius) = complete(FAHRENHEIT_TO_CELSIUS, start, result)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("FahrenheitToCelsius: {_fahrenheit} -> {celsius}");
        Ok(Response::new(CelsiusResponse {
            celsius: celsius.degrees(),
        }))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(celsius = req.get_ref().celsius)))]
    async fn celsius_to_fahrenheit(
        &self,
        req: Request<CelsiusRequest>,
    ) -> Result<Response<FahrenheitResponse>, Status> {
        let start = Instant::now();
        increment_requests(CELSIUS_TO_FAHRENHEIT);

        let result = self.ensure_serving().and_then(|()| {
            let celsius = Celsius::new(req.into_inner().celsius)?;
            Ok((celsius, celsius.to_fahrenheit()?))
        });
        let (_celsius, fahrenheit) = complete(CELSIUS_TO_FAHRENHEIT, start, result)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("CelsiusToFahrenheit: {_celsius} -> {fahrenheit}");
        Ok(Response::new(FahrenheitResponse {
            fahrenheit: fahrenheit.degrees(),
        }))
    }
}
