// ABOUTME: User-supplied provisioning parameters for the generate operation
// ABOUTME: Parses request bodies with defaults for every field

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::error::{ProvisionError, Result};
use crate::template::TemplateContext;

/// Tuning values for the generated infrastructure.
///
/// Values are kept as the JSON the caller sent, whatever its type, and
/// reach the template unchanged. Only `instance_type` and `num_replicas`
/// reach the Terraform template; `postgres_version`, `max_connections`
/// and `shared_buffers` are accepted but not used by any template yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningParams {
    #[serde(default = "default_postgres_version")]
    pub postgres_version: JsonValue,

    #[serde(default = "default_instance_type")]
    pub instance_type: JsonValue,

    #[serde(default = "default_num_replicas")]
    pub num_replicas: JsonValue,

    #[serde(default = "default_max_connections")]
    pub max_connections: JsonValue,

    #[serde(default = "default_shared_buffers")]
    pub shared_buffers: JsonValue,
}

fn default_postgres_version() -> JsonValue {
    JsonValue::from("14")
}

fn default_instance_type() -> JsonValue {
    JsonValue::from("t2.medium")
}

fn default_num_replicas() -> JsonValue {
    JsonValue::from(1)
}

fn default_max_connections() -> JsonValue {
    JsonValue::from(200)
}

fn default_shared_buffers() -> JsonValue {
    JsonValue::from("256MB")
}

impl Default for ProvisioningParams {
    fn default() -> Self {
        Self {
            postgres_version: default_postgres_version(),
            instance_type: default_instance_type(),
            num_replicas: default_num_replicas(),
            max_connections: default_max_connections(),
            shared_buffers: default_shared_buffers(),
        }
    }
}

impl ProvisioningParams {
    /// Parse a raw request body.
    ///
    /// An empty body, invalid JSON, or an empty/zero/null JSON value is
    /// `NoData`. Any other value that is not an object is
    /// `InvalidParameters`. Field types are not checked.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: JsonValue = serde_json::from_slice(body).map_err(|_| ProvisionError::NoData)?;

        if is_empty_value(&value) {
            return Err(ProvisionError::NoData);
        }

        if !value.is_object() {
            return Err(ProvisionError::InvalidParameters(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| ProvisionError::InvalidParameters(e.to_string()))
    }

    /// Variables for the Terraform template
    pub fn terraform_context(&self) -> TemplateContext {
        let mut context = TemplateContext::new();
        context.set_variable("instance_type", self.instance_type.clone());
        context.set_variable("num_replicas", self.num_replicas.clone());
        context
    }
}

fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(a) => a.is_empty(),
        JsonValue::Object(o) => o.is_empty(),
    }
}
