// ABOUTME: Implementation of the serve and generate CLI commands
// ABOUTME: Builds the provisioner from configuration and hands it to the server or runs it once

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use crate::provision::{Provisioner, ProvisioningParams};
use crate::server::{self, AppState};

/// Provisioner wired to the configured workspace and a shell runner
pub fn build_provisioner(config: &Config) -> Provisioner {
    let runner = config.runner.shell_runner();
    Provisioner::new(config.paths.layout(), Arc::new(runner))
}

/// Run the HTTP API until interrupted
pub async fn serve(host: Option<String>, port: Option<u16>, config: &Config) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }
    let addr = server_config.socket_addr()?;

    let provisioner = build_provisioner(config);
    let layout = provisioner.layout();
    if !layout.templates_dir.is_dir() {
        warn!(
            "Template directory {} does not exist; generate and configure will fail",
            layout.templates_dir.display()
        );
    }
    info!(
        "Workspace: templates={}, terraform={}, ansible={}",
        layout.templates_dir.display(),
        layout.terraform_dir.display(),
        layout.ansible_dir.display()
    );

    server::serve(AppState::new(provisioner), addr).await
}

/// Render main.tf once from command line parameters
pub async fn generate(params: ProvisioningParams, config: &Config) -> Result<()> {
    let provisioner = build_provisioner(config);
    let report = provisioner.generate(&params)?;

    println!("{}", report.message);
    println!("  {}", provisioner.layout().main_tf().display());
    Ok(())
}
