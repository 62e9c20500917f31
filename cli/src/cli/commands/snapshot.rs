//! Snapshot command handler (`ss`, `ss create`, `ss build`).

use tracing::info;

use crate::cli::commands::Context;
use crate::error::Result;
use crate::git::GitOperations;
use crate::version::{derive_snapshot_version, workspace_slug};
use crate::workspace::WorkspaceStore;

/// Handles the default snapshot command.
///
/// Rewrites the manifest's `version` to a snapshot version for the current
/// git revision. With `with_workspace`, the current workspace's slug is
/// embedded in the version.
///
/// # Errors
///
/// Returns an error if:
/// - The manifest cannot be read, parsed or written
/// - The project is not in a git repository (nothing is changed)
/// - The current version has a non-numeric minor component
pub fn handle_snapshot(ctx: &Context, with_workspace: bool) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let current = manifest.version()?;

    let revision = ctx.git()?.current_commit()?;

    let workspace = if with_workspace {
        Some(ctx.store.current_workspace_name()?)
    } else {
        None
    };
    let slug = workspace.as_deref().map(workspace_slug);

    if current.to_lowercase().contains("snapshot") {
        println!("Previous snapshot found, replacing revision...");
    } else {
        println!("Creating brand new snapshot, bumping minor version...");
    }

    let new_version = derive_snapshot_version(current, &revision, slug.as_deref())?;

    match &workspace {
        Some(name) => println!("Creating snapshot for workspace '{name}': {new_version}"),
        None => println!("Creating snapshot: {new_version}"),
    }

    let patched = manifest.with_version(&new_version)?;
    manifest.write(&patched)?;

    info!(from = current, to = %new_version, "manifest version updated");
    println!("Success!");

    Ok(())
}
