//! gRPC service implementation.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`TemperatureService`).

pub mod handler;
