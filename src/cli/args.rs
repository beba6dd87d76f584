// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the serve and generate subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::provision::ProvisioningParams;

#[derive(Parser)]
#[command(name = "pgprovision")]
#[command(about = "Render Terraform/Ansible configuration for PostgreSQL clusters and drive terraform and ansible-playbook")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the provisioning HTTP API
    Serve {
        #[arg(long, help = "Address to bind (overrides configuration)")]
        host: Option<String>,

        #[arg(short, long, help = "Port to listen on (overrides configuration)")]
        port: Option<u16>,
    },

    /// Render terraform/main.tf once without starting the server
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long, default_value = "14")]
    pub postgres_version: String,

    #[arg(long, default_value = "t2.medium")]
    pub instance_type: String,

    #[arg(long, default_value_t = 1)]
    pub num_replicas: u32,

    #[arg(long, default_value_t = 200)]
    pub max_connections: u32,

    #[arg(long, default_value = "256MB")]
    pub shared_buffers: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<GenerateArgs> for ProvisioningParams {
    fn from(args: GenerateArgs) -> Self {
        Self {
            postgres_version: args.postgres_version.into(),
            instance_type: args.instance_type.into(),
            num_replicas: args.num_replicas.into(),
            max_connections: args.max_connections.into(),
            shared_buffers: args.shared_buffers.into(),
        }
    }
}
