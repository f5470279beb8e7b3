//! Error handling for Lattice.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod resolve_error;

pub use config_error::ConfigError;
pub use resolve_error::{ResolveError, ResolveWarning};
