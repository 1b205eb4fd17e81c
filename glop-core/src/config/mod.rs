//! Configuration management.
//!
//! - [`types`]: the configuration schema ([`GlopConfig`], [`LoggingConfig`],
//!   [`WindowConfig`], [`InputConfig`]).
//! - [`defaults`]: default values used by serde for missing fields.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates `config.toml`.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{GlopConfig, InputConfig, LoggingConfig, WindowConfig};
