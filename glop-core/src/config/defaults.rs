//! Default configuration values.
//!
//! Referenced by the `serde(default = ...)` attributes in [`super::types`].

use std::path::PathBuf;

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file by default.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(super) fn default_log_format() -> String {
    "text".to_string()
}

pub(super) fn default_window_title() -> String {
    "glop window".to_string()
}

pub(super) fn default_window_width() -> i32 {
    640
}

pub(super) fn default_window_height() -> i32 {
    480
}

pub(super) fn default_true() -> bool {
    true
}
