//! General utilities.
//!
//! - [`fs`]: directory creation with [`crate::error::CoreError`] mapping.
//! - [`paths`]: XDG-style application directories.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
