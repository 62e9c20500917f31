//! Git-specific error types.
//!
//! This module defines error types for git operations:
//! - [`GitError`] - All git-related errors with user-friendly messages

use thiserror::Error;

/// Errors specific to git operations.
#[derive(Error, Debug)]
pub enum GitError {
    /// Not in a git repository.
    #[error("Not a git repository. Run this command inside the package's git repository.")]
    NotARepository,

    /// HEAD does not point at a commit yet.
    #[error("Repository has no commits yet. Commit your work before snapshotting.")]
    NoCommits,

    /// General git2 library error.
    #[error("Git error: {0}")]
    Git2(String),
}
