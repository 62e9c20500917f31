//! Workspace-specific error types.

use thiserror::Error;

/// Errors specific to workspace store operations.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Workspace with the given name is already registered.
    #[error("Workspace '{0}' already exists.")]
    AlreadyExists(String),

    /// Workspace with the given name has no data record.
    #[error("Workspace '{0}' does not exist. Run 'ss workspace ls' to see available workspaces.")]
    NotFound(String),

    /// Invalid workspace name.
    #[error("Invalid workspace name '{0}': {1}")]
    InvalidName(String, String),

    /// Failed to read/write a store record.
    #[error("Workspace storage error: {0}")]
    Storage(String),

    /// A stored record could not be deserialized.
    #[error("Workspace data corrupted: {0}")]
    Corrupted(String),

    /// One or both writes of a workspace save failed.
    #[error("Workspace '{name}' was not fully saved: {details}")]
    PartialSave {
        /// The workspace being saved.
        name: String,
        /// Which writes failed and why.
        details: String,
    },
}

impl WorkspaceError {
    /// Checks if this is a "not found" error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Checks if this is an "already exists" error.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}
