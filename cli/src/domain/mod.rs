//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod connection;
pub mod error;
pub mod request;
pub mod resource;

#[allow(unused_imports)]
pub use config::{DbupConfig, validate_config_key, validate_config_value};
#[allow(unused_imports)]
pub use connection::ConnectionDetails;
#[allow(unused_imports)]
pub use error::{ConfigError, ProvisionError, StateError, ValidationError};
#[allow(unused_imports)]
pub use request::{ProvisionParams, ProvisionRequest};
#[allow(unused_imports)]
pub use resource::{PollObservation, ResourceHandle, ResourceState};
