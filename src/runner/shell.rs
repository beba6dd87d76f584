// ABOUTME: Shell-backed command executor built on tokio::process
// ABOUTME: Hands whole command lines to `<shell> -c` so operators like && keep their meaning

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info};

use super::{CommandExecutor, CommandOutput};

pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Runs command lines through a shell interpreter.
///
/// The child inherits the server's environment plus any extra variables
/// configured here. Without a timeout a hung command blocks its caller
/// indefinitely.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    env: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            env: HashMap::new(),
            timeout: None,
        }
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_command(&self, command_line: &str, working_dir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command_line);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

#[async_trait]
impl CommandExecutor for ShellRunner {
    async fn run(&self, command_line: &str, working_dir: Option<&Path>) -> CommandOutput {
        match working_dir {
            Some(dir) => info!("Running `{}` in {}", command_line, dir.display()),
            None => info!("Running `{}`", command_line),
        }

        let mut cmd = self.build_command(command_line, working_dir);

        let result = match self.timeout {
            Some(limit) => match timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    let error_msg =
                        format!("Command timed out after {} seconds", limit.as_secs());
                    error!("{}: {}", error_msg, command_line);
                    return CommandOutput::spawn_failure(error_msg);
                }
            },
            None => cmd.output().await,
        };

        match result {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();

                debug!(
                    "Command exited with {:?} ({} bytes stdout, {} bytes stderr)",
                    output.status.code(),
                    stdout.len(),
                    stderr.len()
                );

                CommandOutput { stdout, stderr }
            }
            Err(e) => {
                let error_msg = format!("Failed to execute: {}", e);
                error!("{}", error_msg);
                CommandOutput::spawn_failure(error_msg)
            }
        }
    }
}
