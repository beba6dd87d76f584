// ABOUTME: Variable mapping handed to the template engine for a single render
// ABOUTME: Collects named JSON values and converts them into the Handlebars data context

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::error::Result;

/// Named variables available to a template while it renders.
///
/// Variables that a template references but the context lacks render as
/// empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateContext {
    variables: Map<String, JsonValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, serializing the value to JSON
    pub fn with_variable<T: Serialize>(mut self, key: &str, value: T) -> Result<Self> {
        self.set_variable(key, serde_json::to_value(value)?);
        Ok(self)
    }

    /// Add or replace a variable
    pub fn set_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    pub fn get_variable(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Convert the context to the JSON object Handlebars renders against
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.variables.clone())
    }
}
