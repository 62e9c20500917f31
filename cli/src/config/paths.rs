//! Platform-specific path utilities for snapshot-creator.

use std::path::PathBuf;

use crate::error::{Result, SnapError};

/// Directory name used under the platform config directory.
const APP_DIR: &str = "snapshot-creator";

/// Get the configuration directory for snapshot-creator.
///
/// - Linux: `~/.config/snapshot-creator`
/// - macOS: `~/Library/Application Support/snapshot-creator`
/// - Windows: `%APPDATA%\snapshot-creator`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| SnapError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join(APP_DIR))
}

/// Get the settings file path.
pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.toml"))
}

/// Get the default workspace store directory (`~/.snapshot-creator`).
pub fn default_store_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SnapError::Config("Cannot determine home directory".to_string()))?;
    Ok(home.join(format!(".{APP_DIR}")))
}
