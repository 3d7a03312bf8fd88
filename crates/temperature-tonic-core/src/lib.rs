#![doc = include_str!("../README.md")]

mod common;
pub use common::*;

/// gRPC service and message definitions generated from
/// `proto/temperature.proto`.
///
/// ## Service
///
/// - `FahrenheitToCelsius` - `(fahrenheit - 32) * 5 / 9`
/// - `CelsiusToFahrenheit` - `celsius * 9 / 5 + 32`
///
/// Both the client ([`temperature_converter_client`]) and server
/// ([`temperature_converter_server`]) halves are generated.
///
/// [`FILE_DESCRIPTOR_SET`] holds the encoded schema for gRPC reflection.
pub mod proto {
    tonic::include_proto!("temperature");

    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("temperature_descriptor");
}
