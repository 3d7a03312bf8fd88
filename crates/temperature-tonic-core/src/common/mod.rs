//! Shared types, conversion logic and error definitions.
//!
//! ## Submodules
//!
//! - [`error`] - Centralized service error type and its gRPC status mapping.
//! - [`types`] - Validated temperature value types, the conversion formulas
//!   and scale constants.

pub mod error;
pub mod types;

pub use error::{Error, Result};
