//! The external publish action.
//!
//! - [`PublishRunner`] - Trait for running the publish action (enables mocking)
//! - [`CommandPublisher`] - Runs a configured command as a blocking subprocess
//!
//! There is no timeout: a hanging publish command blocks until it exits or
//! the process is killed.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::publish::error::PublishError;

/// Captured output of a successful publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Trait for the publish action.
#[cfg_attr(test, mockall::automock)]
pub trait PublishRunner {
    /// Publishes the package in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the action cannot be started or reports failure.
    fn publish(&self, dir: &Path) -> Result<PublishOutput, PublishError>;
}

/// Publishes by running a command line such as `npm publish`.
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    program: String,
    args: Vec<String>,
}

impl CommandPublisher {
    /// Builds a publisher from a whitespace-separated command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is empty.
    pub fn from_command_line(command: &str) -> Result<Self, PublishError> {
        let mut words = command.split_whitespace().map(String::from);
        let program = words.next().ok_or(PublishError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PublishRunner for CommandPublisher {
    fn publish(&self, dir: &Path) -> Result<PublishOutput, PublishError> {
        debug!(command = %self.command_line(), dir = %dir.display(), "running publish command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .output()
            .map_err(|source| PublishError::Spawn {
                command: self.command_line(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(PublishOutput { stdout, stderr })
        } else {
            Err(PublishError::Failed {
                status: output.status.code(),
                stdout,
                stderr,
            })
        }
    }
}
