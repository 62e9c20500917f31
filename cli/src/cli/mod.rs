//! CLI module for ss.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ShellType, WorkspaceCommands};
