//! Server-side components of the temperature converter.
//!
//! - [`config`] - CLI/environment configuration.
//! - [`serve`] - Router assembly and graceful shutdown.
//! - [`service`] - The `TemperatureConverter` gRPC handler.
//! - [`telemetry`] - Logging, tracing and metrics bootstrap.

pub mod config;
pub mod serve;
pub mod service;
pub mod telemetry;
