//! Workspace management for snapshot-creator.
//!
//! This module provides the workspace store:
//! - A config record naming the current workspace and all registered ones
//! - One data record per workspace listing its tracked packages
//! - Create, load, save, switch and delete operations

pub mod error;
pub mod storage;
pub mod types;

pub use error::WorkspaceError;
pub use storage::{FileWorkspaceStore, WorkspaceStore};
pub use types::{
    PackageEntry, UpsertOutcome, Workspace, WorkspaceConfig, WorkspaceSummary, DEFAULT_WORKSPACE,
};
