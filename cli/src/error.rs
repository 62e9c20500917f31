//! Error types and result aliases for snapshot-creator.
//!
//! This module provides the crate-wide error type:
//! - Module errors (workspace, manifest, version, publish, git) wrapped via `#[from]`
//! - User-friendly messages with recovery hints
//! - [`SnapError::kind`] to classify any failure into a small set of kinds

use thiserror::Error;

use crate::git::GitError;
use crate::manifest::ManifestError;
use crate::publish::PublishError;
use crate::version::VersionError;
use crate::workspace::WorkspaceError;

/// Main error type for snapshot-creator operations.
#[derive(Error, Debug)]
pub enum SnapError {
    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read the settings file.
    #[error("Failed to read settings file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Data serialization error: {0}. This may indicate corrupted data.")]
    Serialization(String),

    /// Workspace store error.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Project manifest error.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Snapshot version derivation error.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Publish action error.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Git operation error.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// Coarse classification of failures, independent of where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A named workspace does not exist.
    NotFound,
    /// Reading or writing the store or a manifest failed.
    Io,
    /// A manifest or stored record is not valid structured text.
    Parse,
    /// A version component could not be interpreted.
    Value,
    /// The publish action or the revision lookup failed.
    ExternalAction,
}

impl SnapError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Config(_) => ErrorKind::Io,
            Self::ConfigRead(_) | Self::Serialization(_) => ErrorKind::Parse,
            Self::Workspace(err) => match err {
                WorkspaceError::NotFound(_) => ErrorKind::NotFound,
                WorkspaceError::Corrupted(_) => ErrorKind::Parse,
                WorkspaceError::AlreadyExists(_)
                | WorkspaceError::InvalidName(..)
                | WorkspaceError::Storage(_)
                | WorkspaceError::PartialSave { .. } => ErrorKind::Io,
            },
            Self::Manifest(err) => match err {
                ManifestError::Read { .. } | ManifestError::Write { .. } => ErrorKind::Io,
                ManifestError::Invalid(_)
                | ManifestError::MissingField(_)
                | ManifestError::VersionNotPatched => ErrorKind::Parse,
            },
            Self::Version(_) => ErrorKind::Value,
            Self::Publish(_) | Self::Git(_) => ErrorKind::ExternalAction,
        }
    }
}

/// Result type alias using [`SnapError`].
pub type Result<T> = std::result::Result<T, SnapError>;

impl From<serde_json::Error> for SnapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for SnapError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}
