// ABOUTME: Provisioning pipeline for the PostgreSQL cluster workflow
// ABOUTME: Exposes generate, plan, apply and configure independently of the HTTP layer

pub mod error;
pub mod layout;
pub mod params;
pub mod pipeline;

pub use error::{ProvisionError, Result};
pub use layout::WorkspaceLayout;
pub use params::ProvisioningParams;
pub use pipeline::{ApplyReport, ConfigureReport, GenerateReport, PlanReport, Provisioner};
