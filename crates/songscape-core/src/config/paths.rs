//! Path utilities for songscape configuration and data files

use std::path::PathBuf;

/// Get the songscape home directory
///
/// Returns: `~/songscape`
pub fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songscape")
}

/// Returns: `~/songscape/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_home().join("config.yaml")
}

/// Returns: `~/songscape/data`
pub fn default_data_dir() -> PathBuf {
    default_home().join("data")
}
