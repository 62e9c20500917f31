//! Workspace storage operations.
//!
//! This module provides persistence for workspaces:
//! - [`WorkspaceStore`] - Trait for workspace store operations
//! - [`FileWorkspaceStore`] - JSON file-based implementation
//!
//! The store directory holds `config.json` (the [`WorkspaceConfig`]) and one
//! `<name>.json` per workspace. Saving a workspace writes both files, one
//! after the other; the pair is not updated atomically.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::workspace::{
    Workspace, WorkspaceConfig, WorkspaceError, WorkspaceSummary, DEFAULT_WORKSPACE,
};

/// File name of the config record inside the store directory.
const CONFIG_FILE: &str = "config.json";

/// Trait for workspace store operations (enables mocking).
pub trait WorkspaceStore {
    /// Loads the config record, or a fresh in-memory default if none exists.
    ///
    /// Never writes; the default is persisted by the first save.
    fn load_config(&self) -> Result<WorkspaceConfig>;

    /// Persists the config record.
    fn save_config(&self, config: &WorkspaceConfig) -> Result<()>;

    /// Returns the named (or current) workspace, creating and registering it
    /// when its data record does not exist yet.
    fn ensure_workspace(&self, name: Option<&str>) -> Result<Workspace>;

    /// Loads the named (or current) workspace, creating it on a miss.
    fn load_workspace(&self, name: Option<&str>) -> Result<Workspace>;

    /// Stamps `last_modified`, writes the workspace record and its summary in
    /// the config record.
    ///
    /// Both writes are attempted even if the first one fails; any failure is
    /// reported as [`WorkspaceError::PartialSave`].
    fn save_workspace(&self, workspace: &mut Workspace, name: Option<&str>) -> Result<()>;

    /// Creates a new workspace, failing if the name is already registered.
    fn create_workspace(&self, name: &str) -> Result<Workspace>;

    /// Deletes a workspace's data record and config entry.
    ///
    /// Returns `true` if the workspace was deleted, `false` if it didn't exist.
    fn delete_workspace(&self, name: &str) -> Result<bool>;

    /// Makes an existing workspace current. Never creates one.
    fn switch_workspace(&self, name: &str) -> Result<()>;

    /// Checks if a workspace data record exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Name of the current workspace.
    fn current_workspace_name(&self) -> Result<String> {
        Ok(self.load_config()?.current().to_string())
    }

    /// Registered workspaces with their summaries, sorted by name.
    fn list_workspaces(&self) -> Result<Vec<(String, WorkspaceSummary)>> {
        Ok(self.load_config()?.workspaces.into_iter().collect())
    }
}

/// File-based workspace store implementation.
#[derive(Debug, Clone)]
pub struct FileWorkspaceStore {
    base_dir: PathBuf,
}

impl FileWorkspaceStore {
    /// Creates a store in the directory configured by `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be determined.
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::with_dir(settings.store_dir()?))
    }

    /// Creates a store rooted at `base_dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub const fn with_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The store directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Gets the file path for a workspace.
    fn workspace_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }

    /// Validates a workspace name before it becomes a file name.
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(WorkspaceError::InvalidName(
                name.to_string(),
                "name cannot be empty".to_string(),
            )
            .into());
        }

        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(WorkspaceError::InvalidName(
                name.to_string(),
                "name cannot contain path separators".to_string(),
            )
            .into());
        }

        if name.len() > 100 {
            return Err(WorkspaceError::InvalidName(
                name.to_string(),
                "name too long (max 100 characters)".to_string(),
            )
            .into());
        }

        if name == "config" {
            return Err(WorkspaceError::InvalidName(
                name.to_string(),
                "name is reserved for the store config".to_string(),
            )
            .into());
        }

        Ok(())
    }

    fn read_workspace(&self, name: &str) -> Result<Workspace> {
        let path = self.workspace_path(name);
        let contents = fs::read_to_string(&path)
            .map_err(|e| WorkspaceError::Storage(format!("{}: {e}", path.display())))?;
        let mut workspace: Workspace = serde_json::from_str(&contents)
            .map_err(|e| WorkspaceError::Corrupted(format!("{}: {e}", path.display())))?;

        if workspace.name != name {
            warn!(
                workspace = name,
                recorded = %workspace.name,
                "workspace record name does not match its file, using file name"
            );
            workspace.name = name.to_string();
        }

        Ok(workspace)
    }

    /// Writes a record through a temporary sibling file.
    fn write_record<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let storage =
            |e: std::io::Error| WorkspaceError::Storage(format!("{}: {e}", path.display()));

        fs::create_dir_all(&self.base_dir).map_err(storage)?;

        let json = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(storage)?;
        fs::rename(&tmp, path).map_err(storage)?;

        debug!(path = %path.display(), "record written");
        Ok(())
    }
}

impl WorkspaceStore for FileWorkspaceStore {
    fn load_config(&self) -> Result<WorkspaceConfig> {
        let path = self.config_path();

        if !path.exists() {
            return Ok(WorkspaceConfig::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| WorkspaceError::Storage(format!("{}: {e}", path.display())))?;
        let config: WorkspaceConfig = serde_json::from_str(&contents)
            .map_err(|e| WorkspaceError::Corrupted(format!("{}: {e}", path.display())))?;

        Ok(config)
    }

    fn save_config(&self, config: &WorkspaceConfig) -> Result<()> {
        self.write_record(&self.config_path(), config)
    }

    fn ensure_workspace(&self, name: Option<&str>) -> Result<Workspace> {
        let mut config = self.load_config()?;
        let name = config.resolve(name).to_string();
        Self::validate_name(&name)?;

        if self.workspace_path(&name).exists() {
            let workspace = self.read_workspace(&name)?;
            if !config.workspaces.contains_key(&name) {
                config.workspaces.insert(name, workspace.summary());
                self.save_config(&config)?;
            }
            return Ok(workspace);
        }

        let workspace = Workspace::new(name.clone());
        self.write_record(&self.workspace_path(&name), &workspace)?;

        config.workspaces.insert(name.clone(), workspace.summary());
        if config.current_workspace.is_empty() {
            config.current_workspace.clone_from(&name);
        }
        self.save_config(&config)?;

        info!(workspace = %name, "workspace initialized");
        Ok(workspace)
    }

    fn load_workspace(&self, name: Option<&str>) -> Result<Workspace> {
        let config = self.load_config()?;
        let name = config.resolve(name);
        Self::validate_name(name)?;

        if self.workspace_path(name).exists() {
            self.read_workspace(name)
        } else {
            self.ensure_workspace(Some(name))
        }
    }

    fn save_workspace(&self, workspace: &mut Workspace, name: Option<&str>) -> Result<()> {
        let config = self.load_config();

        let target = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !workspace.name.is_empty() => workspace.name.clone(),
            _ => config
                .as_ref()
                .map_or(DEFAULT_WORKSPACE, WorkspaceConfig::current)
                .to_string(),
        };
        Self::validate_name(&target)?;

        workspace.name.clone_from(&target);
        workspace.touch();

        let data = self.write_record(&self.workspace_path(&target), workspace);
        let summary = config.and_then(|mut config| {
            config.workspaces.insert(target.clone(), workspace.summary());
            self.save_config(&config)
        });

        let mut failures = Vec::new();
        if let Err(e) = data {
            failures.push(format!("workspace record: {e}"));
        }
        if let Err(e) = summary {
            failures.push(format!("config record: {e}"));
        }

        if failures.is_empty() {
            debug!(workspace = %target, packages = workspace.packages.len(), "workspace saved");
            Ok(())
        } else {
            let details = failures.join("; ");
            error!(workspace = %target, %details, "workspace save failed");
            Err(WorkspaceError::PartialSave {
                name: target,
                details,
            }
            .into())
        }
    }

    fn create_workspace(&self, name: &str) -> Result<Workspace> {
        Self::validate_name(name)?;

        if self.load_config()?.workspaces.contains_key(name) {
            return Err(WorkspaceError::AlreadyExists(name.to_string()).into());
        }

        self.ensure_workspace(Some(name))
    }

    fn delete_workspace(&self, name: &str) -> Result<bool> {
        Self::validate_name(name)?;

        let path = self.workspace_path(name);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .map_err(|e| WorkspaceError::Storage(format!("{}: {e}", path.display())))?;

        let mut config = self.load_config()?;
        config.unregister(name);
        self.save_config(&config)?;

        info!(workspace = name, current = %config.current(), "workspace deleted");
        Ok(true)
    }

    fn switch_workspace(&self, name: &str) -> Result<()> {
        Self::validate_name(name)?;

        if !self.workspace_path(name).exists() {
            return Err(WorkspaceError::NotFound(name.to_string()).into());
        }

        let mut config = self.load_config()?;
        config.current_workspace = name.to_string();
        self.save_config(&config)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Self::validate_name(name)?;
        Ok(self.workspace_path(name).exists())
    }
}
