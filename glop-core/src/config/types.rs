//! Configuration data structures for glop.
//!
//! These structs are populated by deserializing a TOML file. Missing fields take
//! their values from [`super::defaults`], and unknown fields are rejected via
//! `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use glop_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/glop.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/glop.log")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. `None` disables file logging.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Parameters used when a window is created without explicit arguments.
///
/// Position is measured from the top-left of the root window in native pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "defaults::default_window_title")]
    pub title: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "defaults::default_window_width")]
    pub width: i32,
    #[serde(default = "defaults::default_window_height")]
    pub height: i32,
    /// When `false` the window manager is asked to lock the size (min == max
    /// size hints) and to hide the maximize/resize decorations.
    #[serde(default)]
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: defaults::default_window_title(),
            x: 0,
            y: 0,
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
            resizable: false,
        }
    }
}

/// Input translation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Drop the synthetic release/press pairs X generates for held keys.
    #[serde(default = "defaults::default_true")]
    pub filter_key_repeat: bool,
    /// Report the space bar with the `'/'` key code, as older glop builds did.
    #[serde(default)]
    pub legacy_space_as_slash: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            filter_key_repeat: true,
            legacy_space_as_slash: false,
        }
    }
}

/// Root configuration structure.
///
/// ```
/// use glop_core::config::GlopConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [window]
/// width = 1024
/// height = 768
/// "#;
/// let config: GlopConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.window.width, 1024);
/// assert!(config.input.filter_key_repeat);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlopConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub input: InputConfig,
}
