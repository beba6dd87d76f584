// ABOUTME: Directory layout of the provisioning workspace
// ABOUTME: Resolved once at startup and shared read-only by every operation

use std::path::{Path, PathBuf};

pub const TERRAFORM_TEMPLATE: &str = "main.tf.j2";
pub const INVENTORY_TEMPLATE: &str = "inventory.j2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub templates_dir: PathBuf,
    pub terraform_dir: PathBuf,
    pub ansible_dir: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        terraform_dir: impl Into<PathBuf>,
        ansible_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            terraform_dir: terraform_dir.into(),
            ansible_dir: ansible_dir.into(),
        }
    }

    /// All three directories under a common root
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(
            root.join("templates"),
            root.join("terraform"),
            root.join("ansible"),
        )
    }

    pub fn main_tf(&self) -> PathBuf {
        self.terraform_dir.join("main.tf")
    }

    pub fn plans_dir(&self) -> PathBuf {
        self.terraform_dir.join("plans")
    }

    /// Plan file path as reported to clients. terraform itself writes
    /// `plan.tfplan` into the terraform directory, not here.
    pub fn plan_file(&self) -> PathBuf {
        self.plans_dir().join("plan.tfplan")
    }

    pub fn plan_output_file(&self) -> PathBuf {
        self.plans_dir().join("plan_output.txt")
    }

    pub fn inventory(&self) -> PathBuf {
        self.ansible_dir.join("inventory.ini")
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::new("templates", "terraform", "ansible")
    }
}
