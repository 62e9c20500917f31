//! Publish and add command handlers.

use crate::cli::commands::Context;
use crate::error::Result;
use crate::publish::{
    publish_and_track, record_package, CommandPublisher, PublishOutcome, PublishOutput, Recorded,
};
use crate::workspace::UpsertOutcome;

/// Handles `ss publish` and `ss workspace publish`.
///
/// Runs the configured publish command in the project directory and, if it
/// succeeds, records the package as published in the current workspace.
/// The git revision is looked up only after a successful publish.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, the publish command is
/// empty, the publish command fails, or the package was published but could
/// not be recorded.
pub fn handle_publish(ctx: &Context) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let runner = CommandPublisher::from_command_line(&ctx.settings.publish.command)?;
    let git = ctx.deferred_git();

    println!("Publishing {}@{}...", manifest.name()?, manifest.version()?);

    match publish_and_track(&runner, &git, &ctx.store, &manifest)? {
        PublishOutcome::Recorded { output, recorded } => {
            print_captured(&output);
            println!("Published successfully.");
            print_recorded(&recorded);
            Ok(())
        }
        PublishOutcome::PublishedButNotRecorded { output, error } => {
            print_captured(&output);
            println!("Published successfully, but the workspace was not updated.");
            println!("Run 'ss workspace add' to track this package.");
            Err(error)
        }
        PublishOutcome::Failed(e) => {
            println!("Publish failed. The workspace was not changed.");
            Err(e.into())
        }
    }
}

/// Handles `ss workspace add`: tracks the package without publishing it.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, the project is not in a
/// git repository, or the workspace cannot be saved.
pub fn handle_add(ctx: &Context) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let git = ctx.git()?;

    let recorded = record_package(&git, &ctx.store, &manifest, false)?;
    print_recorded(&recorded);

    Ok(())
}

fn print_recorded(recorded: &Recorded) {
    let verb = match recorded.outcome {
        UpsertOutcome::Updated => "Updated",
        UpsertOutcome::Inserted => "Added",
    };
    println!(
        "{verb} {}@{} in workspace '{}'",
        recorded.entry.name, recorded.entry.version, recorded.workspace
    );
    println!("Workspace saved.");
}

fn print_captured(output: &PublishOutput) {
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        println!("{stdout}");
    }
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }
}
