//! Git operations abstraction for snapshot-creator.
//!
//! This module provides a trait-based abstraction over git operations:
//! - [`GitOperations`] - Trait defining the revision lookup
//! - [`Git2Operations`] - Implementation using the git2 (libgit2) library
//! - [`DeferredGitOperations`] - Finds the repository only when a revision
//!   is requested

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::error::Result;
use crate::git::error::GitError;

/// Trait for git operations (enables mocking in tests).
#[cfg_attr(test, mockall::automock)]
pub trait GitOperations {
    /// Gets the full SHA of the commit HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns an error if not in a git repository or HEAD is unborn.
    fn current_commit(&self) -> Result<String>;
}

/// Git operations implementation using git2 library.
pub struct Git2Operations {
    repo_path: PathBuf,
}

impl Git2Operations {
    /// Opens the repository containing `path`, walking up to its root.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a git repository.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).map_err(|_| GitError::NotARepository)?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::Git2("Bare repository not supported".to_string()))?;

        Ok(Self {
            repo_path: workdir.to_path_buf(),
        })
    }

    /// Opens the repository (internal helper).
    fn repo(&self) -> Result<Repository> {
        Repository::open(&self.repo_path).map_err(|e| GitError::Git2(e.to_string()).into())
    }
}

impl GitOperations for Git2Operations {
    fn current_commit(&self) -> Result<String> {
        let repo = self.repo()?;
        let head = repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch | ErrorCode::NotFound => GitError::NoCommits,
            _ => GitError::Git2(format!("Cannot get HEAD: {e}")),
        })?;
        let commit = head
            .peel_to_commit()
            .map_err(|e| GitError::Git2(format!("Cannot get commit: {e}")))?;

        Ok(commit.id().to_string())
    }
}

/// Revision lookup that discovers the repository on each request.
///
/// Lets a caller start work that doesn't need git before knowing whether the
/// directory is inside a repository.
pub struct DeferredGitOperations {
    path: PathBuf,
}

impl DeferredGitOperations {
    /// Creates a lookup for the repository containing `path`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl GitOperations for DeferredGitOperations {
    fn current_commit(&self) -> Result<String> {
        Git2Operations::discover(&self.path)?.current_commit()
    }
}
