// ABOUTME: Command execution for the external terraform and ansible-playbook tools
// ABOUTME: Defines the executor seam and the captured stdout/stderr result type

pub mod shell;

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

pub use shell::ShellRunner;

/// Captured text output of one command invocation.
///
/// Failures to start a process are reported here too, as an empty `stdout`
/// and the error message in `stderr`, so callers never handle a separate
/// error path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Result for a process that could not be run at all
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }

    /// Any stderr output counts as failure, whatever the exit code
    pub fn has_errors(&self) -> bool {
        !self.stderr.is_empty()
    }
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a shell command line, optionally inside `working_dir`, and wait for it
    async fn run(&self, command_line: &str, working_dir: Option<&Path>) -> CommandOutput;
}
