//! Configuration management for snapshot-creator.

pub mod paths;
pub mod settings;

pub use paths::settings_file;
pub use settings::Settings;

use std::path::Path;

use crate::error::Result;

/// Load settings from the default settings file.
///
/// If the settings file doesn't exist, returns default settings.
pub fn load_settings() -> Result<Settings> {
    let path = settings_file()?;
    load_settings_from(&path)
}

/// Load settings from a specific path.
///
/// If the file doesn't exist, returns default settings.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default().with_env_overrides());
    }

    let contents = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;

    Ok(settings.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnapError;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_settings_from(&temp_dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings.project.manifest, "package.json");
    }

    #[test]
    fn invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "[store\ndir = ").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, SnapError::ConfigRead(_)));
    }
}
