//! Application settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::default_store_dir;
use crate::error::Result;

/// Main settings for snapshot-creator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workspace store settings.
    pub store: StoreSettings,
    /// Publish action settings.
    pub publish: PublishSettings,
    /// Project manifest settings.
    pub project: ProjectSettings,
}

/// Workspace store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store directory. Defaults to `~/.snapshot-creator`.
    pub dir: Option<PathBuf>,
}

/// Publish action settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Command run in the project directory to publish it.
    pub command: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            command: "npm publish".to_string(),
        }
    }
}

/// Project manifest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Manifest file name, relative to the project directory.
    pub manifest: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            manifest: "package.json".to_string(),
        }
    }
}

/// Environment variables that can override settings.
pub mod env {
    pub const STORE_DIR: &str = "SS_HOME";
    pub const PUBLISH_COMMAND: &str = "SS_PUBLISH_COMMAND";
    pub const LOG_LEVEL: &str = "SS_LOG";
}

impl Settings {
    /// Apply environment variable overrides to the settings.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(env::STORE_DIR) {
            if !dir.is_empty() {
                self.store.dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(command) = std::env::var(env::PUBLISH_COMMAND) {
            if !command.trim().is_empty() {
                self.publish.command = command;
            }
        }

        self
    }

    /// The effective workspace store directory.
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.store.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_store_dir(),
        }
    }
}
