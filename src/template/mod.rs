// ABOUTME: Template rendering module for generated infrastructure configuration
// ABOUTME: Loads named templates from the configured directory and renders them with Handlebars

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
