//! Publishing and tracking packages in a workspace.
//!
//! [`publish_and_track`] runs the publish action and, only when it succeeds,
//! records the package in the current workspace. A publish cannot be rolled
//! back, so a failed bookkeeping step after a successful publish is reported
//! as its own outcome. [`record_package`] is the bookkeeping step on its own,
//! used to track a package without publishing it.

pub mod error;
pub mod runner;

pub use error::PublishError;
pub use runner::{CommandPublisher, PublishOutput, PublishRunner};

#[cfg(test)]
pub use runner::MockPublishRunner;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::error::{Result, SnapError};
use crate::git::GitOperations;
use crate::manifest::Manifest;
use crate::workspace::{PackageEntry, UpsertOutcome, WorkspaceStore};

/// A package entry written to a workspace.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Workspace the entry was written to.
    pub workspace: String,
    /// The entry as stored.
    pub entry: PackageEntry,
    /// Whether an existing entry was replaced.
    pub outcome: UpsertOutcome,
}

/// Terminal state of [`publish_and_track`].
#[derive(Debug)]
pub enum PublishOutcome {
    /// Published and tracked.
    Recorded {
        /// Output of the publish action.
        output: PublishOutput,
        /// The tracked entry.
        recorded: Recorded,
    },
    /// Published, but the workspace could not be updated.
    PublishedButNotRecorded {
        /// Output of the publish action.
        output: PublishOutput,
        /// Why tracking failed.
        error: SnapError,
    },
    /// The publish action failed; the workspace was not touched.
    Failed(PublishError),
}

/// Builds an entry from `manifest` at the current revision and upserts it
/// into the current workspace.
///
/// # Errors
///
/// Returns an error if the manifest lacks a name or version, the revision
/// lookup fails, or the workspace cannot be loaded or saved.
pub fn record_package(
    git: &dyn GitOperations,
    store: &dyn WorkspaceStore,
    manifest: &Manifest,
    published: bool,
) -> Result<Recorded> {
    let name = manifest.name()?.to_string();
    let version = manifest.version()?.to_string();
    let git_hash = git.current_commit()?;

    let mut workspace = store.ensure_workspace(None)?;
    let entry = PackageEntry {
        name,
        version,
        git_hash,
        path: manifest.dir().to_path_buf(),
        timestamp: Utc::now(),
        description: manifest.description().to_string(),
        published,
    };

    let outcome = workspace.upsert_package(entry.clone());
    store.save_workspace(&mut workspace, None)?;

    info!(
        workspace = %workspace.name,
        package = %entry.name,
        version = %entry.version,
        path = %entry.path.display(),
        published,
        ?outcome,
        "package recorded"
    );

    Ok(Recorded {
        workspace: workspace.name,
        entry,
        outcome,
    })
}

/// Publishes the package and records it in the current workspace on success.
///
/// # Errors
///
/// Returns an error only if the manifest has no name or version, in which
/// case nothing is published.
pub fn publish_and_track(
    runner: &dyn PublishRunner,
    git: &dyn GitOperations,
    store: &dyn WorkspaceStore,
    manifest: &Manifest,
) -> Result<PublishOutcome> {
    let name = manifest.name()?;
    let version = manifest.version()?;
    info!(package = name, version, "publishing");

    let output = match runner.publish(manifest.dir()) {
        Ok(output) => output,
        Err(e) => {
            warn!(package = name, error = %e, "publish failed, workspace untouched");
            return Ok(PublishOutcome::Failed(e));
        }
    };

    match record_package(git, store, manifest, true) {
        Ok(recorded) => Ok(PublishOutcome::Recorded { output, recorded }),
        Err(e) => {
            error!(
                package = name,
                version,
                error = %e,
                "package published but not recorded in workspace"
            );
            Ok(PublishOutcome::PublishedButNotRecorded { output, error: e })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitError, MockGitOperations};
    use crate::workspace::FileWorkspaceStore;
    use std::path::Path;
    use tempfile::TempDir;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    struct Fixture {
        _temp: TempDir,
        store: FileWorkspaceStore,
        manifest: Manifest,
    }

    fn fixture(version: &str) -> Fixture {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("left-pad");
        std::fs::create_dir_all(&project).unwrap();
        let path = project.join("package.json");
        std::fs::write(
            &path,
            format!(r#"{{ "name": "left-pad", "version": "{version}", "description": "pads" }}"#),
        )
        .unwrap();

        Fixture {
            store: FileWorkspaceStore::with_dir(temp.path().join("store")),
            manifest: Manifest::load(&path).unwrap(),
            _temp: temp,
        }
    }

    fn git_at(sha: &'static str) -> MockGitOperations {
        let mut git = MockGitOperations::new();
        git.expect_current_commit()
            .returning(move || Ok(sha.to_string()));
        git
    }

    fn publishing_ok() -> MockPublishRunner {
        let mut runner = MockPublishRunner::new();
        runner.expect_publish().times(1).returning(|_| {
            Ok(PublishOutput {
                stdout: "+ left-pad@1.0.0".to_string(),
                stderr: String::new(),
            })
        });
        runner
    }

    #[test]
    fn successful_publish_is_recorded_as_published() {
        let fx = fixture("1.0.0");

        let outcome =
            publish_and_track(&publishing_ok(), &git_at(SHA), &fx.store, &fx.manifest).unwrap();

        let (output, recorded) = match outcome {
            PublishOutcome::Recorded { output, recorded } => (output, recorded),
            other => panic!("expected Recorded, got {other:?}"),
        };
        assert_eq!(output.stdout, "+ left-pad@1.0.0");
        assert_eq!(recorded.outcome, UpsertOutcome::Inserted);
        assert!(recorded.entry.published);
        assert_eq!(recorded.entry.git_hash, SHA);
        assert_eq!(recorded.entry.description, "pads");

        let ws = fx.store.load_workspace(None).unwrap();
        assert_eq!(ws.packages.len(), 1);
        assert_eq!(ws.packages[0].path, fx.manifest.dir());
    }

    #[test]
    fn publish_runs_in_manifest_directory() {
        let fx = fixture("1.0.0");
        let expected = fx.manifest.dir().to_path_buf();

        let mut runner = MockPublishRunner::new();
        runner
            .expect_publish()
            .withf(move |dir: &Path| dir == expected.as_path())
            .times(1)
            .returning(|_| Ok(PublishOutput::default()));

        publish_and_track(&runner, &git_at(SHA), &fx.store, &fx.manifest).unwrap();
    }

    #[test]
    fn failed_publish_leaves_workspace_untouched() {
        let fx = fixture("1.0.0");

        let mut runner = MockPublishRunner::new();
        runner.expect_publish().times(1).returning(|_| {
            Err(PublishError::Failed {
                status: Some(1),
                stdout: String::new(),
                stderr: "E403".to_string(),
            })
        });
        let mut git = MockGitOperations::new();
        git.expect_current_commit().never();

        let outcome = publish_and_track(&runner, &git, &fx.store, &fx.manifest).unwrap();

        assert!(matches!(outcome, PublishOutcome::Failed(PublishError::Failed { .. })));
        assert!(!fx.store.exists("default").unwrap());
    }

    #[test]
    fn revision_failure_after_publish_is_reported_distinctly() {
        let fx = fixture("1.0.0");

        let mut git = MockGitOperations::new();
        git.expect_current_commit()
            .returning(|| Err(GitError::NotARepository.into()));

        let outcome = publish_and_track(&publishing_ok(), &git, &fx.store, &fx.manifest).unwrap();

        let error = match outcome {
            PublishOutcome::PublishedButNotRecorded { error, .. } => error,
            other => panic!("expected PublishedButNotRecorded, got {other:?}"),
        };
        assert!(matches!(error, SnapError::Git(GitError::NotARepository)));
        assert!(!fx.store.exists("default").unwrap());
    }

    #[test]
    fn store_failure_after_publish_is_reported_distinctly() {
        let fx = fixture("1.0.0");
        // A regular file where the store directory should be.
        std::fs::write(fx.store.base_dir(), "not a directory").unwrap();

        let outcome =
            publish_and_track(&publishing_ok(), &git_at(SHA), &fx.store, &fx.manifest).unwrap();

        assert!(matches!(
            outcome,
            PublishOutcome::PublishedButNotRecorded { .. }
        ));
    }

    #[test]
    fn manifest_without_version_is_not_published() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        std::fs::write(&path, r#"{ "name": "left-pad" }"#).unwrap();
        let manifest = Manifest::load(&path).unwrap();
        let store = FileWorkspaceStore::with_dir(temp.path().join("store"));

        let mut runner = MockPublishRunner::new();
        runner.expect_publish().never();

        let result = publish_and_track(&runner, &git_at(SHA), &store, &manifest);
        assert!(result.is_err());
    }

    #[test]
    fn add_without_publish_records_unpublished_and_updates_in_place() {
        let fx = fixture("1.0.0");

        let first = record_package(&git_at(SHA), &fx.store, &fx.manifest, false).unwrap();
        assert_eq!(first.outcome, UpsertOutcome::Inserted);
        assert!(!first.entry.published);

        let bumped = fixture("1.1.0");
        let manifest = Manifest::parse(
            fx.manifest.path().to_path_buf(),
            bumped.manifest.raw().to_string(),
        )
        .unwrap();
        let second = record_package(&git_at(SHA), &fx.store, &manifest, false).unwrap();
        assert_eq!(second.outcome, UpsertOutcome::Updated);

        let ws = fx.store.load_workspace(None).unwrap();
        assert_eq!(ws.packages.len(), 1);
        assert_eq!(ws.packages[0].version, "1.1.0");
    }
}
