//! Error types for the temperature conversion service.
//!
//! This module defines the central `Error` enum and implements
//! `From<Error>` for `tonic::Status` so handlers can propagate failures to
//! clients with `?` and the correct status code.
//!
//! ## Error Cases
//! - `InvalidArgument`: The request value (or the value it converts to) is
//!   not a finite number.
//! - `ServiceShutdown`: A request arrived while the service was draining.
//! - `Internal`: Anything else that went wrong on the server side.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the temperature conversion service.
#[derive(Clone, thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// The client request was malformed.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,

    /// Unexpected server-side failure.
    #[error("Internal error: {context}")]
    Internal { context: String },
}

impl Error {
    pub(crate) fn non_finite(field: &str, value: f64) -> Self {
        Self::InvalidArgument {
            reason: format!("`{field}` must be a finite number, got {value}"),
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument { reason } => Status::invalid_argument(reason),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
            Error::Internal { context } => Status::internal(context),
        }
    }
}
