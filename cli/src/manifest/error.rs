//! Manifest-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading, interpreting or rewriting a project manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest could not be read.
    #[error("Can't read manifest at {path}: {source}. Run this command from the package directory.")]
    Read {
        /// Manifest location.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The patched manifest could not be written back.
    #[error("Can't write manifest at {path}: {source}")]
    Write {
        /// Manifest location.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("Manifest is not valid JSON: {0}")]
    Invalid(String),

    /// A required top-level field is missing or not a string.
    #[error("Manifest has no string \"{0}\" field.")]
    MissingField(&'static str),

    /// The top-level version field could not be located in the raw text.
    #[error("Could not locate the \"version\" field to rewrite. Is it a plain top-level string?")]
    VersionNotPatched,
}
