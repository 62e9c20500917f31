//! The project manifest (`package.json`).
//!
//! A [`Manifest`] keeps the raw text next to an order-preserving parse. Reads
//! go through the parse; writes go through [`patch_string_field`] on the raw
//! text so untouched bytes survive.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::manifest::error::ManifestError;
use crate::manifest::patch::patch_string_field;

/// One of the manifest keys holding name to version-range mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

impl DependencySection {
    /// All sections, in the order they are synchronized.
    pub const ALL: [Self; 4] = [
        Self::Dependencies,
        Self::DevDependencies,
        Self::PeerDependencies,
        Self::OptionalDependencies,
    ];

    /// The manifest key for this section.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
            Self::PeerDependencies => "peerDependencies",
            Self::OptionalDependencies => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A project manifest: raw text plus its parsed form.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    raw: String,
    value: Value,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path.to_path_buf(), raw)
    }

    /// Parses manifest text that was read from `path`.
    pub fn parse(path: PathBuf, raw: String) -> Result<Self, ManifestError> {
        let value =
            serde_json::from_str(&raw).map_err(|e| ManifestError::Invalid(e.to_string()))?;
        Ok(Self { path, raw, value })
    }

    /// Where the manifest lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory holding the manifest.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The manifest text exactly as read.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Package name.
    pub fn name(&self) -> Result<&str, ManifestError> {
        self.string_field("name")
    }

    /// Package version, as written.
    pub fn version(&self) -> Result<&str, ManifestError> {
        self.string_field("version")
    }

    /// Package description, empty when absent.
    #[must_use]
    pub fn description(&self) -> &str {
        self.value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Declared `(name, version)` pairs of a section, in document order.
    ///
    /// Entries whose value is not a string are skipped.
    #[must_use]
    pub fn dependencies(&self, section: DependencySection) -> Vec<(&str, &str)> {
        self.value
            .get(section.key())
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, version)| Some((name.as_str(), version.as_str()?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Manifest text with the top-level version replaced.
    ///
    /// Fails if the version differs but the field could not be located in
    /// the raw text.
    pub fn with_version(&self, new_version: &str) -> Result<String, ManifestError> {
        let patched = patch_string_field(&self.raw, "version", new_version, None);
        if patched == self.raw && self.version()? != new_version {
            return Err(ManifestError::VersionNotPatched);
        }
        Ok(patched)
    }

    /// Writes `contents` back to the manifest's path.
    pub fn write(&self, contents: &str) -> Result<(), ManifestError> {
        fs::write(&self.path, contents).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn string_field(&self, field: &'static str) -> Result<&str, ManifestError> {
        self.value
            .get(field)
            .and_then(Value::as_str)
            .ok_or(ManifestError::MissingField(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
  "name": "@acme/app",
  "version": "2.3.0",
  "description": "Example app",
  "dependencies": {
    "zeta": "1.0.0",
    "alpha": "^2.0.0",
    "local": { "not": "a string" }
  }
}
"#;

    fn manifest(raw: &str) -> Manifest {
        Manifest::parse(PathBuf::from("/project/package.json"), raw.to_string()).unwrap()
    }

    #[test]
    fn reads_top_level_fields() {
        let m = manifest(MANIFEST);
        assert_eq!(m.name().unwrap(), "@acme/app");
        assert_eq!(m.version().unwrap(), "2.3.0");
        assert_eq!(m.description(), "Example app");
        assert_eq!(m.dir(), Path::new("/project"));
    }

    #[test]
    fn dependencies_keep_declared_order() {
        let m = manifest(MANIFEST);
        assert_eq!(
            m.dependencies(DependencySection::Dependencies),
            vec![("zeta", "1.0.0"), ("alpha", "^2.0.0")]
        );
        assert!(m.dependencies(DependencySection::DevDependencies).is_empty());
    }

    #[test]
    fn missing_version_is_reported() {
        let m = manifest(r#"{ "name": "x" }"#);
        assert!(matches!(
            m.version(),
            Err(ManifestError::MissingField("version"))
        ));
        assert_eq!(m.description(), "");
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = Manifest::parse(PathBuf::from("package.json"), "{ nope".to_string()).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid(_)));
    }

    #[test]
    fn with_version_patches_raw_text() {
        let m = manifest(MANIFEST);
        let patched = m.with_version("2.4.0-abc123ef-SNAPSHOT").unwrap();
        assert_eq!(
            patched,
            MANIFEST.replace("\"2.3.0\"", "\"2.4.0-abc123ef-SNAPSHOT\"")
        );
        assert_eq!(m.with_version("2.3.0").unwrap(), MANIFEST);
    }

    #[test]
    fn with_version_fails_when_field_is_unreachable() {
        // Escaped key parses as "version" but does not match the raw pattern.
        let m = manifest(r#"{ "name": "x", "vers\u0069on": "1.0.0" }"#);
        assert!(matches!(
            m.with_version("2.0.0"),
            Err(ManifestError::VersionNotPatched)
        ));
    }

    #[test]
    fn load_and_write_round_trip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package.json");
        std::fs::write(&path, MANIFEST).unwrap();

        let m = Manifest::load(&path).unwrap();
        m.write(&m.with_version("9.9.9").unwrap()).unwrap();

        let reloaded = Manifest::load(&path).unwrap();
        assert_eq!(reloaded.version().unwrap(), "9.9.9");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Manifest::load(&temp_dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
