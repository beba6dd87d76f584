// ABOUTME: Error types for the provisioning pipeline
// ABOUTME: Distinguishes request validation failures from execution failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Invalid request, no data provided")]
    NoData,

    #[error("Invalid provisioning parameters: {0}")]
    InvalidParameters(String),

    #[error("{0}")]
    Template(#[from] crate::template::TemplateError),

    #[error("Failed to write {}: {}", path.display(), source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {}", path.display(), source)]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raw stderr of a terraform command, returned to the caller unchanged
    #[error("{0}")]
    CommandFailed(String),

    #[error("Failed to fetch Terraform outputs: {0}")]
    OutputsUnavailable(String),

    #[error("Ansible playbook failed: {0}")]
    PlaybookFailed(String),

    /// Anything else that went wrong while configuring the cluster
    #[error("An error occurred: {0}")]
    Configure(String),
}

impl ProvisionError {
    /// True for errors caused by the request rather than by execution
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoData | Self::InvalidParameters(_))
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
