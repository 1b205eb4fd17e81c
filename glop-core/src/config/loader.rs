//! Configuration loading for glop.
//!
//! [`ConfigLoader::load()`] reads `config.toml` from the application config
//! directory (see [`crate::utils::paths::get_app_config_dir`]). A missing file
//! yields the default configuration. Whatever is loaded is then passed through
//! [`ConfigLoader::validate`], which normalizes case and rejects values the
//! platform layer cannot honor.
//!
//! ```rust,ignore
//! use glop_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("window: {}x{}", config.window.width, config.window.height),
//!     Err(e) => {
//!         glop_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```

use std::fs;
use std::path::Path;

use crate::config::GlopConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::paths::get_app_config_dir;

const CONFIG_FILE_NAME: &str = "config.toml";
const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the user config directory.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DirectoryUnavailable`] if no config directory can be resolved.
    /// - [`ConfigError::ReadError`] for I/O failures other than a missing file.
    /// - [`ConfigError::ParseError`] / [`ConfigError::ValidationError`] for bad content.
    pub fn load() -> Result<GlopConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// A missing file is not an error; the default configuration is returned.
    pub fn load_from_path(path: &Path) -> Result<GlopConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!("Loading configuration from {:?}", path);
                Self::load_from_str(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No configuration at {:?}, using defaults", path);
                let mut config = GlopConfig::default();
                Self::validate(&mut config)?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
            .into()),
        }
    }

    /// Parses and validates TOML content.
    pub fn load_from_str(content: &str) -> Result<GlopConfig, CoreError> {
        let mut config: GlopConfig = if content.trim().is_empty() {
            GlopConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate(&mut config)?;
        Ok(config)
    }

    /// Normalizes and checks a configuration in place.
    pub fn validate(config: &mut GlopConfig) -> Result<(), ConfigError> {
        config.logging.level = config.logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                config.logging.level
            )));
        }

        config.logging.format = config.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format: {}",
                config.logging.format
            )));
        }

        let window = &config.window;
        if window.x < 0 || window.y < 0 || window.width <= 0 || window.height <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "bad window dims: (x,y): ({},{}), (dx,dy): ({},{})",
                window.x, window.y, window.width, window.height
            )));
        }

        Ok(())
    }
}
