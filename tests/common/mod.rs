// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a scripted command executor and temporary workspaces with the shipped templates

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use pgprovision::provision::{Provisioner, WorkspaceLayout};
use pgprovision::runner::{CommandExecutor, CommandOutput};
use pgprovision::server::{self, AppState};

pub const PLAN: &str = "terraform init && terraform plan -out=plan.tfplan";
pub const APPLY: &str = "terraform apply -auto-approve";
pub const OUTPUT: &str = "terraform output -json";
pub const PLAYBOOK: &str = "ansible-playbook playbook.yml -i inventory.ini";

pub const SAMPLE_OUTPUTS: &str =
    r#"{"primary_ip":{"value":"1.2.3.4"},"replica_ips":{"value":["5.6.7.8"]}}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub working_dir: Option<PathBuf>,
}

/// Returns canned output per command line and records every call
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, stdout: &str, stderr: &str) -> Self {
        self.responses
            .insert(command.to_string(), CommandOutput::new(stdout, stderr));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.command).collect()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn run(&self, command_line: &str, working_dir: Option<&Path>) -> CommandOutput {
        self.calls.lock().unwrap().push(RecordedCall {
            command: command_line.to_string(),
            working_dir: working_dir.map(Path::to_path_buf),
        });

        self.responses
            .get(command_line)
            .cloned()
            .unwrap_or_else(|| {
                CommandOutput::spawn_failure(format!("unexpected command: {}", command_line))
            })
    }
}

/// A temporary workspace populated with the repository's templates
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub layout: WorkspaceLayout,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let workspace = Self::empty();
        let layout = &workspace.layout;

        std::fs::create_dir_all(&layout.templates_dir).unwrap();
        for name in ["main.tf.j2", "inventory.j2"] {
            std::fs::copy(shipped_templates().join(name), layout.templates_dir.join(name))
                .unwrap();
        }
        std::fs::create_dir_all(&layout.ansible_dir).unwrap();

        workspace
    }

    /// Workspace with no templates and no directories
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let layout = WorkspaceLayout::rooted_at(temp_dir.path());
        Self { temp_dir, layout }
    }

    pub fn provisioner(&self, executor: Arc<ScriptedExecutor>) -> Provisioner {
        Provisioner::new(self.layout.clone(), executor)
    }

    pub fn router(&self, executor: Arc<ScriptedExecutor>) -> axum::Router {
        server::router(AppState::new(self.provisioner(executor)))
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}

pub fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}
