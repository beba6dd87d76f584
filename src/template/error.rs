// ABOUTME: Error types for template engine operations
// ABOUTME: Separates missing templates, syntax errors and render failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template syntax error in {name}: {message}")]
    SyntaxError { name: String, message: String },

    #[error("Failed to read template {name}: {source}")]
    ReadError {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
