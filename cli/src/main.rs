//! Snapshot Creator - snapshot versions for locally built packages
//!
//! `ss` stamps a package with a snapshot version derived from its git
//! revision, tracks published packages in named workspaces, and syncs the
//! dependencies of other projects to the tracked versions.

mod cli;
mod config;
mod error;
mod git;
mod manifest;
mod publish;
mod sync;
mod version;
mod workspace;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::commands::{self, Context};
use crate::cli::{Cli, Commands, WorkspaceCommands};
use crate::config::settings::env;
use crate::error::Result;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::LOG_LEVEL).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the command
    if let Err(e) = run(cli) {
        debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        return commands::handle_completions(shell);
    }

    let ctx = Context::from_current_dir(config::load_settings()?)?;

    match cli.command {
        None => commands::handle_snapshot(&ctx, cli.workspace),
        Some(Commands::Create { workspace }) => commands::handle_snapshot(&ctx, workspace),
        Some(Commands::Publish) => commands::handle_publish(&ctx),
        Some(Commands::Workspace { command }) => match command {
            WorkspaceCommands::Publish => commands::handle_publish(&ctx),
            WorkspaceCommands::List { name } => commands::handle_list(&ctx, name.as_deref()),
            WorkspaceCommands::Clear { name } => commands::handle_clear(&ctx, name.as_deref()),
            WorkspaceCommands::Sync => commands::handle_sync(&ctx),
            WorkspaceCommands::Add => commands::handle_add(&ctx),
            WorkspaceCommands::Create { name } => commands::handle_create(&ctx, &name),
            WorkspaceCommands::Use { name } => commands::handle_use(&ctx, &name),
            WorkspaceCommands::Current => commands::handle_current(&ctx),
            WorkspaceCommands::Ls => commands::handle_ls(&ctx),
        },
        Some(Commands::Completions { shell }) => commands::handle_completions(shell),
    }
}
