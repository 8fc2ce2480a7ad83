//! Error types produced while populating configuration.

mod constructors;
mod types;

pub use types::{ConfigError, ConfigResult};
