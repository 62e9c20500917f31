//! Git operations module for snapshot-creator.
//!
//! Provides the revision lookup used to stamp snapshot versions and tracked
//! packages with the commit they were built from.

pub mod error;
pub mod operations;

pub use error::GitError;
pub use operations::{DeferredGitOperations, Git2Operations, GitOperations};

#[cfg(test)]
pub use operations::MockGitOperations;
