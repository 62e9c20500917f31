//! Workspace data types for snapshot-creator.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name used when neither an explicit nor a current workspace is set.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Process-wide store configuration (`config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Name of the workspace commands operate on by default.
    #[serde(default = "default_workspace_name")]
    pub current_workspace: String,

    /// Registered workspaces, keyed by name.
    #[serde(default)]
    pub workspaces: BTreeMap<String, WorkspaceSummary>,

    /// When the config was first created.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

/// Per-workspace summary kept in the config record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    /// When the workspace was created.
    pub created: DateTime<Utc>,
    /// When the workspace record was last saved.
    pub last_modified: DateTime<Utc>,
}

/// A named, independently persisted collection of tracked packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Workspace name (used as filename).
    pub name: String,

    /// Tracked packages in insertion order.
    #[serde(default)]
    pub packages: Vec<PackageEntry>,

    /// When the workspace was created.
    pub created: DateTime<Utc>,

    /// When the workspace was last saved.
    #[serde(default = "Utc::now")]
    pub last_modified: DateTime<Utc>,
}

/// One tracked `(name, path)` pair with its version and revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    /// Package name from the manifest.
    pub name: String,

    /// Raw version string from the manifest.
    pub version: String,

    /// Full revision identifier the package was built from.
    pub git_hash: String,

    /// Absolute source directory.
    pub path: PathBuf,

    /// When the entry was last touched.
    pub timestamp: DateTime<Utc>,

    /// Manifest description, empty when absent.
    #[serde(default)]
    pub description: String,

    /// Whether the entry was recorded after a successful publish.
    #[serde(default)]
    pub published: bool,
}

/// Result of [`Workspace::upsert_package`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An entry with the same `(name, path)` was replaced in place.
    Updated,
    /// The entry was appended.
    Inserted,
}

fn default_workspace_name() -> String {
    DEFAULT_WORKSPACE.to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            current_workspace: default_workspace_name(),
            workspaces: BTreeMap::new(),
            created: Utc::now(),
        }
    }
}

impl WorkspaceConfig {
    /// The current workspace, falling back to [`DEFAULT_WORKSPACE`] when unset.
    #[must_use]
    pub fn current(&self) -> &str {
        if self.current_workspace.is_empty() {
            DEFAULT_WORKSPACE
        } else {
            &self.current_workspace
        }
    }

    /// Resolves an optional explicit name against the current workspace.
    #[must_use]
    pub fn resolve<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        match name {
            Some(name) if !name.is_empty() => name,
            _ => self.current(),
        }
    }

    /// Removes a workspace and reassigns the current one if needed.
    ///
    /// The replacement is the first remaining name in sorted order, or the
    /// default name when nothing remains.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.workspaces.remove(name).is_some();

        if self.current() == name {
            self.current_workspace = self
                .workspaces
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(default_workspace_name);
        }

        removed
    }
}

impl Workspace {
    /// Creates an empty workspace with the current timestamp.
    #[must_use]
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            name,
            packages: Vec::new(),
            created: now,
            last_modified: now,
        }
    }

    /// Updates the `last_modified` timestamp.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Summary stored in the config record.
    #[must_use]
    pub const fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            created: self.created,
            last_modified: self.last_modified,
        }
    }

    /// Replaces the entry with the same `(name, path)` or appends a new one.
    pub fn upsert_package(&mut self, entry: PackageEntry) -> UpsertOutcome {
        match self
            .packages
            .iter()
            .position(|pkg| pkg.name == entry.name && pkg.path == entry.path)
        {
            Some(index) => {
                self.packages[index] = entry;
                UpsertOutcome::Updated
            }
            None => {
                self.packages.push(entry);
                UpsertOutcome::Inserted
            }
        }
    }
}
