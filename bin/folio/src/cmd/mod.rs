//! CLI command implementations.

pub mod bio;
pub mod build;
pub mod check;
pub mod css;

use std::path::{Path, PathBuf};

/// Directory that relative paths in the config resolve against.
pub(crate) fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
