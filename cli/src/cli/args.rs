//! Command-line argument parsing.

use clap::{Parser, Subcommand, ValueEnum};

/// Snapshot versions for locally built packages.
///
/// Stamps the package in the current directory with a snapshot version built
/// from the current git revision, tracks published packages in named
/// workspaces, and syncs dependent projects to the tracked versions.
#[derive(Parser, Debug)]
#[command(name = "ss")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Include the current workspace name in the snapshot version when no
    /// subcommand is given.
    #[arg(short, long)]
    pub workspace: bool,

    /// Subcommand to execute. Defaults to creating a snapshot.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a snapshot version in package.json from the current git revision.
    ///
    /// A fresh snapshot bumps the minor version; an existing snapshot only
    /// gets its revision replaced.
    #[command(visible_alias = "build")]
    Create {
        /// Include the current workspace name in the snapshot version.
        #[arg(short, long)]
        workspace: bool,
    },

    /// Publish the current package and add it to the workspace on success.
    Publish,

    /// Manage snapshot workspaces.
    #[command(visible_alias = "ws")]
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// Generate shell completion scripts.
    ///
    /// Outputs completion script for the specified shell.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Workspace subcommands.
#[derive(Subcommand, Debug)]
pub enum WorkspaceCommands {
    /// Publish the current package and add it to the workspace on success.
    Publish,

    /// List all packages in a workspace.
    List {
        /// Workspace to list (defaults to the current workspace).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a workspace.
    Clear {
        /// Workspace to clear (defaults to the current workspace).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Sync workspace versions into package.json dependencies.
    Sync,

    /// Add the current package to the workspace without publishing.
    Add,

    /// Create a new workspace.
    Create {
        /// Name of the workspace to create.
        #[arg(short, long)]
        name: String,
    },

    /// Switch to a different workspace.
    Use {
        /// Name of the workspace to switch to.
        #[arg(short, long)]
        name: String,
    },

    /// Show the current workspace.
    Current,

    /// List all available workspaces.
    Ls,
}

/// Supported shells for completion scripts.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}
