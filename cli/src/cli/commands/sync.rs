//! Sync command handler (`ss workspace sync`).

use crate::cli::commands::Context;
use crate::error::Result;
use crate::sync::sync_dependencies;
use crate::workspace::WorkspaceStore;

/// Handles `ss workspace sync`.
///
/// Rewrites the project's dependency versions to those tracked in the
/// current workspace and writes the manifest if anything changed.
///
/// # Errors
///
/// Returns an error if the manifest or workspace cannot be read, or the
/// manifest cannot be written.
pub fn handle_sync(ctx: &Context) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let workspace = ctx.store.load_workspace(None)?;

    if workspace.packages.is_empty() {
        println!("Workspace '{}' has no packages to sync.", workspace.name);
        return Ok(());
    }

    println!("Syncing with workspace '{}'...\n", workspace.name);
    let report = sync_dependencies(&manifest, &workspace);

    for update in &report.updates {
        println!(
            "  Updated {} ({}): {} -> {}",
            update.name, update.section, update.old_version, update.new_version
        );
    }
    for current in &report.up_to_date {
        println!(
            "  {} ({}) already at {}",
            current.name, current.section, current.version
        );
    }
    for missed in &report.unpatched {
        println!(
            "  Could not update {} ({}): entry not found in {}",
            missed.name,
            missed.section,
            manifest.path().display()
        );
    }

    if report.matched() == 0 {
        println!("No dependencies match packages in this workspace.");
        return Ok(());
    }

    if report.is_changed() {
        manifest.write(&report.document)?;
    }

    println!(
        "\n{} updated, {} already current, {} failed.",
        report.updates.len(),
        report.up_to_date.len(),
        report.unpatched.len()
    );
    if report.is_changed() {
        println!("Run 'npm install' to install the synced versions.");
    }

    Ok(())
}
