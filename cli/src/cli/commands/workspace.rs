//! Workspace command handlers.
//!
//! - [`handle_list`] - List packages in a workspace (`ss ws list`)
//! - [`handle_clear`] - Delete a workspace (`ss ws clear`)
//! - [`handle_create`] - Create a workspace (`ss ws create`)
//! - [`handle_use`] - Switch the current workspace (`ss ws use`)
//! - [`handle_current`] - Show the current workspace (`ss ws current`)
//! - [`handle_ls`] - List all workspaces (`ss ws ls`)
//! - [`handle_completions`] - Print shell completions (`ss completions`)

use crate::cli::commands::Context;
use crate::cli::ShellType;
use crate::error::{Result, SnapError};
use crate::workspace::WorkspaceStore;

/// Number of revision characters shown in listings.
const SHORT_HASH_LEN: usize = 8;

fn short_hash(hash: &str) -> &str {
    hash.char_indices()
        .nth(SHORT_HASH_LEN)
        .map_or(hash, |(end, _)| &hash[..end])
}

/// Handles `ss workspace list [-n NAME]`.
///
/// # Errors
///
/// Returns an error if the workspace cannot be loaded.
pub fn handle_list(ctx: &Context, name: Option<&str>) -> Result<()> {
    let workspace = ctx.store.load_workspace(name)?;

    if workspace.packages.is_empty() {
        println!("No packages in workspace '{}'.", workspace.name);
        println!("\nAdd one with: ss workspace add");
        return Ok(());
    }

    println!("Packages in workspace '{}':\n", workspace.name);
    for pkg in &workspace.packages {
        let state = if pkg.published { "published" } else { "local" };
        println!("  {}@{} ({state})", pkg.name, pkg.version);
        println!("    Revision: {}", short_hash(&pkg.git_hash));
        println!("    Path: {}", pkg.path.display());
        if !pkg.description.is_empty() {
            println!("    Description: {}", pkg.description);
        }
        println!(
            "    Updated: {}",
            pkg.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        println!();
    }

    Ok(())
}

/// Handles `ss workspace clear [-n NAME]`.
///
/// # Errors
///
/// Returns an error if the name is invalid or the store cannot be updated.
pub fn handle_clear(ctx: &Context, name: Option<&str>) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => ctx.store.current_workspace_name()?,
    };

    if ctx.store.delete_workspace(&name)? {
        println!("Deleted workspace '{name}'.");
        println!(
            "Current workspace: {}",
            ctx.store.current_workspace_name()?
        );
    } else {
        println!("Workspace '{name}' not found.");
    }

    Ok(())
}

/// Handles `ss workspace create -n NAME`.
///
/// # Errors
///
/// Returns an error if the name is invalid or the store cannot be written.
pub fn handle_create(ctx: &Context, name: &str) -> Result<()> {
    match ctx.store.create_workspace(name) {
        Ok(_) => {
            println!("Created workspace '{name}'.");
            println!("\nSwitch to it with: ss workspace use -n {name}");
            Ok(())
        }
        Err(SnapError::Workspace(e)) if e.is_already_exists() => {
            println!("Workspace '{name}' already exists.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Handles `ss workspace use -n NAME`.
///
/// # Errors
///
/// Returns an error if the workspace does not exist or the config cannot be
/// written.
pub fn handle_use(ctx: &Context, name: &str) -> Result<()> {
    match ctx.store.switch_workspace(name) {
        Ok(()) => {
            println!("Switched to workspace '{name}'.");
            Ok(())
        }
        Err(SnapError::Workspace(e)) if e.is_not_found() => {
            println!("Workspace '{name}' not found.");
            print_available(ctx)?;
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}

/// Handles `ss workspace current`.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
pub fn handle_current(ctx: &Context) -> Result<()> {
    println!("Current workspace: {}", ctx.store.current_workspace_name()?);
    Ok(())
}

/// Handles `ss workspace ls`.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
pub fn handle_ls(ctx: &Context) -> Result<()> {
    let current = ctx.store.current_workspace_name()?;
    let workspaces = ctx.store.list_workspaces()?;

    if workspaces.is_empty() {
        println!("No workspaces yet.");
        println!("\nCreate one with: ss workspace create -n <name>");
        return Ok(());
    }

    println!("Workspaces:\n");
    for (name, summary) in &workspaces {
        let marker = if *name == current { "*" } else { " " };
        println!(
            "{marker} {name}  (updated {})",
            summary.last_modified.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

fn print_available(ctx: &Context) -> Result<()> {
    let workspaces = ctx.store.list_workspaces()?;
    if workspaces.is_empty() {
        println!("No workspaces exist yet.");
    } else {
        println!("Available workspaces:");
        for (name, _) in &workspaces {
            println!("  {name}");
        }
    }
    Ok(())
}

/// Handles `ss completions <shell>`.
///
/// # Errors
///
/// This function currently does not return errors.
pub fn handle_completions(shell: ShellType) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell};

    let mut cmd = crate::cli::Cli::command();
    let shell = match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
    };
    generate(shell, &mut cmd, "ss", &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::project;
    use crate::error::ErrorKind;

    const MANIFEST: &str = r#"{ "name": "app", "version": "1.0.0" }"#;

    #[test]
    fn short_hash_truncates_to_eight() {
        assert_eq!(
            short_hash("0123456789abcdef0123456789abcdef01234567"),
            "01234567"
        );
        assert_eq!(short_hash("abc"), "abc");
    }

    #[test]
    fn create_then_use_switches_current() {
        let p = project(MANIFEST);

        handle_create(&p.ctx, "team").unwrap();
        assert_eq!(p.ctx.store.current_workspace_name().unwrap(), "default");

        handle_use(&p.ctx, "team").unwrap();
        assert_eq!(p.ctx.store.current_workspace_name().unwrap(), "team");
    }

    #[test]
    fn creating_existing_workspace_is_not_an_error() {
        let p = project(MANIFEST);

        handle_create(&p.ctx, "team").unwrap();
        handle_create(&p.ctx, "team").unwrap();
        assert_eq!(p.ctx.store.list_workspaces().unwrap().len(), 1);
    }

    #[test]
    fn use_unknown_workspace_is_not_found() {
        let p = project(MANIFEST);
        handle_create(&p.ctx, "team").unwrap();

        let err = handle_use(&p.ctx, "nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(p.ctx.store.current_workspace_name().unwrap(), "default");
        assert!(!p.ctx.store.exists("nope").unwrap());
    }

    #[test]
    fn clear_current_reassigns_to_remaining() {
        let p = project(MANIFEST);
        handle_create(&p.ctx, "alpha").unwrap();
        handle_create(&p.ctx, "beta").unwrap();
        handle_use(&p.ctx, "beta").unwrap();

        handle_clear(&p.ctx, None).unwrap();

        assert!(!p.ctx.store.exists("beta").unwrap());
        assert_eq!(p.ctx.store.current_workspace_name().unwrap(), "alpha");
    }

    #[test]
    fn clear_missing_workspace_is_a_no_op() {
        let p = project(MANIFEST);
        handle_clear(&p.ctx, Some("ghost")).unwrap();
    }

    #[test]
    fn invalid_names_are_rejected() {
        let p = project(MANIFEST);
        assert!(handle_create(&p.ctx, "../escape").is_err());
        assert!(handle_create(&p.ctx, "config").is_err());
    }

    #[test]
    fn read_only_handlers_succeed_on_empty_store() {
        let p = project(MANIFEST);
        handle_list(&p.ctx, None).unwrap();
        handle_ls(&p.ctx).unwrap();
        handle_current(&p.ctx).unwrap();
    }
}
