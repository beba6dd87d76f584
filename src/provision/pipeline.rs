// ABOUTME: The four provisioning operations: generate, plan, apply and configure
// ABOUTME: Each one renders a template and/or runs one external command and reports its raw output

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error::{ProvisionError, Result};
use super::layout::{WorkspaceLayout, INVENTORY_TEMPLATE, TERRAFORM_TEMPLATE};
use super::params::ProvisioningParams;
use crate::runner::CommandExecutor;
use crate::template::{TemplateContext, TemplateEngine};

pub const PLAN_COMMAND: &str = "terraform init && terraform plan -out=plan.tfplan";
pub const APPLY_COMMAND: &str = "terraform apply -auto-approve";
pub const OUTPUT_COMMAND: &str = "terraform output -json";
pub const PLAYBOOK_COMMAND: &str = "ansible-playbook playbook.yml -i inventory.ini";

// Ansible files are not generated here despite what the message says.
const GENERATE_MESSAGE: &str = "Terraform and Ansible configurations generated successfully!";
const PLAN_MESSAGE: &str = "Terraform plan executed successfully";
const CONFIGURE_MESSAGE: &str = "Ansible playbook executed successfully";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub message: String,
    pub output: String,
    pub plan_file: String,
    pub plan_output_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyReport {
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigureReport {
    pub message: String,
    pub output: String,
    pub primary_ip: JsonValue,
    pub replica_ips: JsonValue,
}

/// Drives terraform and ansible-playbook against a fixed workspace layout.
///
/// Nothing here serializes access: two concurrent `apply` calls run two
/// terraform processes against the same state, and concurrent writers of
/// the same file overwrite each other.
#[derive(Clone)]
pub struct Provisioner {
    layout: WorkspaceLayout,
    templates: TemplateEngine,
    runner: Arc<dyn CommandExecutor>,
}

impl Provisioner {
    pub fn new(layout: WorkspaceLayout, runner: Arc<dyn CommandExecutor>) -> Self {
        let templates = TemplateEngine::new(layout.templates_dir.clone());
        Self {
            layout,
            templates,
            runner,
        }
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Render `main.tf` from the provisioning parameters
    pub fn generate(&self, params: &ProvisioningParams) -> Result<GenerateReport> {
        info!(
            "Generating Terraform configuration: instance_type={}, num_replicas={}",
            params.instance_type, params.num_replicas
        );

        let context = params.terraform_context();
        let config = self.templates.render(TERRAFORM_TEMPLATE, &context)?;

        create_dir(&self.layout.terraform_dir)?;
        let main_tf = self.layout.main_tf();
        write_file(&main_tf, &config)?;
        info!("Wrote {} ({} bytes)", main_tf.display(), config.len());

        Ok(GenerateReport {
            message: GENERATE_MESSAGE.to_string(),
        })
    }

    /// Run `terraform init` and `terraform plan`, saving the plan output
    pub async fn plan(&self) -> Result<PlanReport> {
        let plans_dir = self.layout.plans_dir();
        create_dir(&plans_dir)?;

        let output = self
            .runner
            .run(PLAN_COMMAND, Some(&self.layout.terraform_dir))
            .await;

        let plan_output_file = self.layout.plan_output_file();
        let saved = write_file(&plan_output_file, &output.stdout);

        // Terraform's own stderr wins over a failure to save its stdout
        if output.has_errors() {
            if let Err(e) = saved {
                warn!("{}", e);
            }
            error!("terraform plan reported errors");
            return Err(ProvisionError::CommandFailed(output.stderr));
        }

        saved?;
        debug!(
            "Saved {} bytes of plan output to {}",
            output.stdout.len(),
            plan_output_file.display()
        );

        Ok(PlanReport {
            message: PLAN_MESSAGE.to_string(),
            output: output.stdout,
            plan_file: self.layout.plan_file().display().to_string(),
            plan_output_file: plan_output_file.display().to_string(),
        })
    }

    /// Run `terraform apply` without interactive approval
    pub async fn apply(&self) -> Result<ApplyReport> {
        let output = self
            .runner
            .run(APPLY_COMMAND, Some(&self.layout.terraform_dir))
            .await;

        if output.has_errors() {
            error!("terraform apply reported errors");
            return Err(ProvisionError::CommandFailed(output.stderr));
        }

        info!("terraform apply completed");
        Ok(ApplyReport {
            output: output.stdout,
        })
    }

    /// Build the Ansible inventory from Terraform outputs and run the playbook.
    ///
    /// Steps run in order and nothing is undone when a later step fails: a
    /// failing playbook leaves the freshly written `inventory.ini` in place.
    pub async fn configure(&self) -> Result<ConfigureReport> {
        let outputs = self
            .runner
            .run(OUTPUT_COMMAND, Some(&self.layout.terraform_dir))
            .await;
        if outputs.has_errors() {
            error!("terraform output reported errors");
            return Err(ProvisionError::OutputsUnavailable(outputs.stderr));
        }

        let parsed: JsonValue = serde_json::from_str(&outputs.stdout).map_err(configure_error)?;
        let primary_ip = output_value(&parsed, "primary_ip")?;
        let replica_ips = output_value(&parsed, "replica_ips")?;
        info!("Configuring primary {} with replicas {}", primary_ip, replica_ips);

        let mut context = TemplateContext::new();
        context.set_variable("primary_ip", primary_ip.clone());
        context.set_variable("replica_ips", replica_ips.clone());

        let inventory = self
            .templates
            .render(INVENTORY_TEMPLATE, &context)
            .map_err(configure_error)?;
        write_file(&self.layout.inventory(), &inventory).map_err(configure_error)?;

        let output = self
            .runner
            .run(PLAYBOOK_COMMAND, Some(&self.layout.ansible_dir))
            .await;
        if output.has_errors() {
            error!("ansible-playbook reported errors");
            return Err(ProvisionError::PlaybookFailed(output.stderr));
        }

        Ok(ConfigureReport {
            message: CONFIGURE_MESSAGE.to_string(),
            output: output.stdout,
            primary_ip,
            replica_ips,
        })
    }
}

/// `outputs[key]["value"]` from `terraform output -json`
fn output_value(outputs: &JsonValue, key: &str) -> Result<JsonValue> {
    outputs
        .get(key)
        .and_then(|output| output.get("value"))
        .cloned()
        .ok_or_else(|| configure_error(format!("missing Terraform output '{}'", key)))
}

fn configure_error(err: impl Display) -> ProvisionError {
    ProvisionError::Configure(err.to_string())
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ProvisionError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| ProvisionError::Write {
        path: path.to_path_buf(),
        source,
    })
}
