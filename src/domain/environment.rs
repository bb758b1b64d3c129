use serde::{Deserialize, Serialize};

use super::configuration::EnvironmentTarget;

/// Variable kind as understood by Postman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Default,
    Secret,
}

/// One `{key, value, enabled, type}` entry of an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub key: String,
    pub value: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
}

impl EnvironmentVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            variable_type: VariableType::Default,
        }
    }

    pub fn secret(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { variable_type: VariableType::Secret, ..Self::new(key, value) }
    }
}

/// Environment payload sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub values: Vec<EnvironmentVariable>,
}

impl Environment {
    /// Environment for `target`, named after the spec it serves.
    pub fn for_target(spec_name: &str, target: &EnvironmentTarget) -> Self {
        Self {
            name: target.display_name(spec_name),
            values: vec![
                EnvironmentVariable::new("base_url", &target.base_url),
                EnvironmentVariable::new("token_url", &target.token_url),
                EnvironmentVariable::new("client_id", &target.client_id),
                EnvironmentVariable::secret("client_secret", &target.client_secret),
            ],
        }
    }
}
