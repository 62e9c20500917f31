//! Publish-specific error types.

use thiserror::Error;

/// Errors running the publish action.
#[derive(Error, Debug)]
pub enum PublishError {
    /// No publish command is configured.
    #[error("Publish command is empty. Set 'publish.command' in settings.toml or SS_PUBLISH_COMMAND.")]
    EmptyCommand,

    /// The publish command could not be started.
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The publish command ran and reported failure.
    #[error("Publish failed{}: {}", exit_suffix(.status.as_ref().copied()), .stderr.trim())]
    Failed {
        /// Exit code, if the process exited normally.
        status: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

fn exit_suffix(status: Option<i32>) -> String {
    status.map_or_else(
        || " (terminated by signal)".to_string(),
        |code| format!(" (exit code {code})"),
    )
}
