//! Snapshot version derivation.
//!
//! A fresh snapshot bumps the minor version once and resets the patch:
//! `2.3.1` becomes `2.4.0-<rev>-SNAPSHOT`. A version that is already a
//! snapshot keeps its numeric core and only swaps the revision, so repeated
//! snapshots in one development cycle don't keep bumping the minor version.

use thiserror::Error;

/// Errors interpreting a version string.
#[derive(Error, Debug)]
pub enum VersionError {
    /// The numeric core has no minor component.
    #[error("Version '{0}' has no minor component to bump.")]
    MissingMinor(String),

    /// The minor component is not a non-negative integer.
    #[error("Version '{version}' has a non-numeric minor component '{component}'.")]
    NonNumeric {
        /// The full version string.
        version: String,
        /// The offending component.
        component: String,
    },

    /// The minor component cannot be incremented.
    #[error("Version '{0}' has a minor component too large to bump.")]
    OutOfRange(String),
}

/// Suffix marking a snapshot version.
const SNAPSHOT_SUFFIX: &str = "SNAPSHOT";

/// Computes the next snapshot version for `current` at `revision`.
///
/// `workspace_slug`, when given, is embedded between the revision and the
/// suffix (see [`workspace_slug`]).
pub fn derive_snapshot_version(
    current: &str,
    revision: &str,
    workspace_slug: Option<&str>,
) -> Result<String, VersionError> {
    let slug = workspace_slug.map(|slug| format!("-{slug}")).unwrap_or_default();
    let core = current.split_once('-').map_or(current, |(core, _)| core);

    if current.to_lowercase().contains("snapshot") {
        return Ok(format!("{core}-{revision}{slug}-{SNAPSHOT_SUFFIX}"));
    }

    let mut components = core.split('.');
    let major = components.next().unwrap_or_default();
    let minor = components
        .next()
        .ok_or_else(|| VersionError::MissingMinor(current.to_string()))?;

    let minor: u64 = minor.parse().map_err(|_| VersionError::NonNumeric {
        version: current.to_string(),
        component: minor.to_string(),
    })?;
    let minor = minor
        .checked_add(1)
        .ok_or_else(|| VersionError::OutOfRange(current.to_string()))?;

    Ok(format!("{major}.{minor}.0-{revision}{slug}-{SNAPSHOT_SUFFIX}"))
}

/// Lower-cases a workspace name and replaces everything outside `[a-z0-9]`
/// with `-`.
#[must_use]
pub fn workspace_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}
