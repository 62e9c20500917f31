//! Command implementations.
//!
//! Every handler receives a [`Context`] carrying the settings, the workspace
//! store and the project directory, so none of them reach for global state.

pub mod publish;
pub mod snapshot;
pub mod sync;
pub mod workspace;

pub use publish::{handle_add, handle_publish};
pub use snapshot::handle_snapshot;
pub use sync::handle_sync;
pub use workspace::{
    handle_clear, handle_completions, handle_create, handle_current, handle_list, handle_ls,
    handle_use,
};

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::Result;
use crate::git::{DeferredGitOperations, Git2Operations};
use crate::manifest::Manifest;
use crate::workspace::FileWorkspaceStore;

/// Shared state for a single command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective settings.
    pub settings: Settings,
    /// The workspace store.
    pub store: FileWorkspaceStore,
    /// Directory the command operates on.
    pub project_dir: PathBuf,
}

impl Context {
    /// Builds the context for the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory or the current directory
    /// cannot be determined.
    pub fn from_current_dir(settings: Settings) -> Result<Self> {
        let store = FileWorkspaceStore::new(&settings)?;
        let project_dir = std::env::current_dir()?;
        Ok(Self {
            settings,
            store,
            project_dir,
        })
    }

    /// Path of the project manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(&self.settings.project.manifest)
    }

    /// Reads the project manifest.
    pub fn load_manifest(&self) -> Result<Manifest> {
        Ok(Manifest::load(&self.manifest_path())?)
    }

    /// Opens the git repository containing the project.
    pub fn git(&self) -> Result<Git2Operations> {
        Git2Operations::discover(&self.project_dir)
    }

    /// Revision lookup for the project that defers repository discovery.
    #[must_use]
    pub fn deferred_git(&self) -> DeferredGitOperations {
        DeferredGitOperations::new(&self.project_dir)
    }
}
