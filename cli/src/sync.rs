//! Dependency synchronization against a workspace.
//!
//! [`sync_dependencies`] looks up every declared dependency of a manifest in
//! the workspace's tracked packages and rewrites differing versions in place.
//! Sections are visited in [`DependencySection::ALL`] order and entries in
//! the manifest's own key order. Nothing is written to disk here.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::manifest::{patch_string_field, DependencySection, Manifest};
use crate::workspace::Workspace;

/// A declared dependency whose version differs from the tracked one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUpdate {
    /// Dependency name.
    pub name: String,
    /// Section the dependency is declared in.
    pub section: DependencySection,
    /// Version declared in the manifest.
    pub old_version: String,
    /// Version tracked in the workspace.
    pub new_version: String,
}

/// A declared dependency already at the tracked version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentDependency {
    /// Dependency name.
    pub name: String,
    /// Section the dependency is declared in.
    pub section: DependencySection,
    /// The shared version.
    pub version: String,
}

/// Outcome of [`sync_dependencies`].
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// The manifest text with all applied updates.
    pub document: String,
    /// Updates applied to `document`.
    pub updates: Vec<DependencyUpdate>,
    /// Dependencies that were already current.
    pub up_to_date: Vec<CurrentDependency>,
    /// Updates that could not be located in the raw text.
    pub unpatched: Vec<DependencyUpdate>,
}

impl SyncReport {
    /// Whether `document` differs from the manifest it came from.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.updates.is_empty()
    }

    /// Number of declared dependencies that matched a tracked package.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.updates.len() + self.up_to_date.len() + self.unpatched.len()
    }
}

/// Latest tracked version per package name; later entries win.
fn tracked_versions(workspace: &Workspace) -> HashMap<&str, &str> {
    let mut versions = HashMap::new();
    for pkg in &workspace.packages {
        versions.insert(pkg.name.as_str(), pkg.version.as_str());
    }
    versions
}

/// Rewrites declared dependency versions to the versions tracked in
/// `workspace`.
#[must_use]
pub fn sync_dependencies(manifest: &Manifest, workspace: &Workspace) -> SyncReport {
    let tracked = tracked_versions(workspace);
    let mut report = SyncReport {
        document: manifest.raw().to_string(),
        updates: Vec::new(),
        up_to_date: Vec::new(),
        unpatched: Vec::new(),
    };

    for section in DependencySection::ALL {
        for (name, declared) in manifest.dependencies(section) {
            let Some(&version) = tracked.get(name) else {
                continue;
            };

            if declared == version {
                report.up_to_date.push(CurrentDependency {
                    name: name.to_string(),
                    section,
                    version: version.to_string(),
                });
                continue;
            }

            let update = DependencyUpdate {
                name: name.to_string(),
                section,
                old_version: declared.to_string(),
                new_version: version.to_string(),
            };

            let patched = patch_string_field(&report.document, name, version, Some(section.key()));
            if patched == report.document {
                warn!(dependency = name, %section, "dependency entry not found in manifest text");
                report.unpatched.push(update);
            } else {
                debug!(dependency = name, %section, from = declared, to = version, "dependency patched");
                report.document = patched;
                report.updates.push(update);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::PackageEntry;
    use chrono::Utc;
    use std::path::PathBuf;

    fn manifest(raw: &str) -> Manifest {
        Manifest::parse(PathBuf::from("/project/package.json"), raw.to_string()).unwrap()
    }

    fn workspace(packages: &[(&str, &str, &str)]) -> Workspace {
        let mut ws = Workspace::new("test".to_string());
        for (name, path, version) in packages {
            ws.upsert_package(PackageEntry {
                name: (*name).to_string(),
                version: (*version).to_string(),
                git_hash: "abc".to_string(),
                path: PathBuf::from(path),
                timestamp: Utc::now(),
                description: String::new(),
                published: true,
            });
        }
        ws
    }

    #[test]
    fn updates_differing_dependency() {
        let raw = r#"{
  "name": "app",
  "dependencies": {
    "left-pad": "1.0.0"
  }
}"#;
        let report = sync_dependencies(
            &manifest(raw),
            &workspace(&[("left-pad", "/src/left-pad", "1.2.0")]),
        );

        assert_eq!(report.document, raw.replace("1.0.0", "1.2.0"));
        assert_eq!(
            report.updates,
            vec![DependencyUpdate {
                name: "left-pad".to_string(),
                section: DependencySection::Dependencies,
                old_version: "1.0.0".to_string(),
                new_version: "1.2.0".to_string(),
            }]
        );
        assert!(report.up_to_date.is_empty());
        assert!(report.is_changed());
    }

    #[test]
    fn equal_versions_are_reported_current_without_patching() {
        let raw = r#"{ "devDependencies": { "left-pad": "1.2.0" } }"#;
        let report = sync_dependencies(
            &manifest(raw),
            &workspace(&[("left-pad", "/src/left-pad", "1.2.0")]),
        );

        assert_eq!(report.document, raw);
        assert!(report.updates.is_empty());
        assert_eq!(report.up_to_date.len(), 1);
        assert_eq!(report.up_to_date[0].section, DependencySection::DevDependencies);
        assert!(!report.is_changed());
    }

    #[test]
    fn later_tracked_entries_win() {
        let raw = r#"{ "dependencies": { "util": "0.1.0" } }"#;
        let ws = workspace(&[("util", "/a/util", "1.0.0"), ("util", "/b/util", "2.0.0")]);

        let report = sync_dependencies(&manifest(raw), &ws);
        assert_eq!(report.updates[0].new_version, "2.0.0");
        assert!(report.document.contains(r#""util": "2.0.0""#));
    }

    #[test]
    fn visits_sections_in_fixed_order_and_declared_key_order() {
        let raw = r#"{
  "optionalDependencies": { "d": "0.0.1" },
  "peerDependencies": { "c": "0.0.1" },
  "devDependencies": { "b": "0.0.1" },
  "dependencies": { "z": "0.0.1", "a": "0.0.1" }
}"#;
        let ws = workspace(&[
            ("a", "/a", "1.0.0"),
            ("b", "/b", "1.0.0"),
            ("c", "/c", "1.0.0"),
            ("d", "/d", "1.0.0"),
            ("z", "/z", "1.0.0"),
        ]);

        let report = sync_dependencies(&manifest(raw), &ws);
        let order: Vec<_> = report
            .updates
            .iter()
            .map(|u| (u.section, u.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (DependencySection::Dependencies, "z"),
                (DependencySection::Dependencies, "a"),
                (DependencySection::DevDependencies, "b"),
                (DependencySection::PeerDependencies, "c"),
                (DependencySection::OptionalDependencies, "d"),
            ]
        );
        assert!(!report.document.contains("0.0.1"));
    }

    #[test]
    fn same_dependency_in_two_sections_is_patched_per_section() {
        let raw = r#"{
  "dependencies": { "foo": "1.0.0" },
  "devDependencies": { "foo": "1.1.0" }
}"#;
        let report = sync_dependencies(&manifest(raw), &workspace(&[("foo", "/foo", "1.1.0")]));

        assert_eq!(report.updates.len(), 1);
        assert_eq!(report.updates[0].section, DependencySection::Dependencies);
        assert_eq!(report.up_to_date.len(), 1);
        assert_eq!(
            report.document,
            raw.replace(r#""foo": "1.0.0""#, r#""foo": "1.1.0""#)
        );
    }

    #[test]
    fn untracked_dependencies_are_ignored() {
        let raw = r#"{ "dependencies": { "react": "^18.0.0" } }"#;
        let report = sync_dependencies(&manifest(raw), &workspace(&[("vue", "/vue", "3.0.0")]));

        assert_eq!(report.matched(), 0);
        assert_eq!(report.document, raw);
    }

    #[test]
    fn entries_hidden_by_nested_objects_are_reported_unpatched() {
        let raw = r#"{
  "dependencies": {
    "weird": { "nested": "x" },
    "foo": "1.0.0"
  }
}"#;
        let report = sync_dependencies(&manifest(raw), &workspace(&[("foo", "/foo", "2.0.0")]));

        assert!(report.updates.is_empty());
        assert_eq!(report.unpatched.len(), 1);
        assert_eq!(report.document, raw);
    }
}
