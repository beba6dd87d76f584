// ABOUTME: Main library module for the pgprovision service
// ABOUTME: Exports the template, runner, provisioning, server and CLI modules

pub mod cli;
pub mod provision;
pub mod runner;
pub mod server;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use provision::{ProvisionError, Provisioner, ProvisioningParams, WorkspaceLayout};
pub use runner::{CommandExecutor, CommandOutput, ShellRunner};
pub use server::{router, AppState};
pub use template::{TemplateContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
