//! # glop Core Library (`glop-core`)
//!
//! Foundation layer shared by the glop platform crates:
//!
//! - **Error Handling**: [`CoreError`] and the specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Configuration**: TOML-backed [`GlopConfig`] loaded by [`ConfigLoader`],
//!   covering logging, default window parameters and input translation options.
//! - **Logging**: `tracing` subscriber setup (console and optional rolling file).
//! - **Types**: integer geometry used for window dimensions.
//!
//! ```rust,ignore
//! use glop_core::config::ConfigLoader;
//! use glop_core::logging::init_logging;
//!
//! fn main() -> Result<(), glop_core::CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("glop core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, GlopConfig, InputConfig, LoggingConfig, WindowConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{Point, PointInt, Rect, RectInt, Size, SizeInt};
