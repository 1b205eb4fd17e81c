//! Application-specific path resolution built on `directories-next`.
//!
//! On Linux the config directory resolves to `$XDG_CONFIG_HOME/glop`
//! (usually `~/.config/glop`).

use crate::error::{ConfigError, CoreError};
use directories_next::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "glop";
const APPLICATION: &str = "glop";

/// Returns the application-specific configuration directory.
///
/// # Errors
/// Returns [`CoreError::Config`] wrapping [`ConfigError::DirectoryUnavailable`]
/// when no home directory can be determined.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}
