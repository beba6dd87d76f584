// ABOUTME: Template engine implementation using Handlebars
// ABOUTME: Reads templates by name from a fixed directory and renders them without HTML escaping

use handlebars::Handlebars;
use serde_json::Value as JsonValue;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    template_dir: PathBuf,
}

impl TemplateEngine {
    /// Create an engine that loads templates from `template_dir`
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        let mut handlebars = Handlebars::new();

        // Missing variables render as empty text
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Output is HCL and INI, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            handlebars,
            template_dir: template_dir.into(),
        }
    }

    /// Path a template name resolves to
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.template_dir.join(name)
    }

    /// Load the named template and render it with the given context
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let source = self.load(name)?;
        self.validate_template(name, &source)?;

        let rendered = self.render_template(&source, &context.to_json())?;
        debug!(
            "Rendered template {} ({} variables, {} bytes)",
            name,
            context.len(),
            rendered.len()
        );
        Ok(rendered)
    }

    /// Render a template string with a JSON context
    pub fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::RenderError)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, name: &str, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError {
                name: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn load(&self, name: &str) -> Result<String> {
        let path = self.template_path(name);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::ReadError {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn engine_with(templates: &[(&str, &str)]) -> (TempDir, TemplateEngine) {
        let dir = TempDir::new().unwrap();
        for (name, content) in templates {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let engine = TemplateEngine::new(dir.path());
        (dir, engine)
    }

    #[test]
    fn test_render_named_template() {
        let (_dir, engine) = engine_with(&[(
            "main.tf.j2",
            "instance_type = \"{{instance_type}}\"\ncount = {{num_replicas}}\n",
        )]);

        let context = TemplateContext::new()
            .with_variable("instance_type", "t2.medium")
            .unwrap()
            .with_variable("num_replicas", 2)
            .unwrap();

        let result = engine.render("main.tf.j2", &context).unwrap();
        assert_eq!(result, "instance_type = \"t2.medium\"\ncount = 2\n");
    }

    #[test]
    fn test_missing_template() {
        let (_dir, engine) = engine_with(&[]);

        let err = engine
            .render("inventory.j2", &TemplateContext::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(ref name) if name == "inventory.j2"));
        assert_eq!(err.to_string(), "Template not found: inventory.j2");
    }

    #[test]
    fn test_syntax_error() {
        let (_dir, engine) = engine_with(&[("broken.j2", "Hello {{name}")]);

        let err = engine
            .render("broken.j2", &TemplateContext::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::SyntaxError { .. }));
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let (_dir, engine) = engine_with(&[("partial.j2", "[{{primary_ip}}]")]);

        let result = engine.render("partial.j2", &TemplateContext::new()).unwrap();
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new("unused");
        let result = engine
            .render_template("{{value}}", &json!({ "value": "a && b <c> \"d\"" }))
            .unwrap();
        assert_eq!(result, "a && b <c> \"d\"");
    }

    #[test]
    fn test_each_over_list() {
        let engine = TemplateEngine::new("unused");
        let result = engine
            .render_template(
                "{{#each replica_ips}}{{this}};{{/each}}",
                &json!({ "replica_ips": ["5.6.7.8", "9.9.9.9"] }),
            )
            .unwrap();
        assert_eq!(result, "5.6.7.8;9.9.9.9;");
    }

    #[test]
    fn test_template_validation() {
        let engine = TemplateEngine::new("unused");

        assert!(engine.validate_template("ok", "Hello {{name}}").is_ok());
        assert!(engine.validate_template("bad", "Hello {{name}").is_err());
        assert!(engine
            .validate_template("block", "{{#if primary_ip}}yes{{else}}no{{/if}}")
            .is_ok());
    }
}
