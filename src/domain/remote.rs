//! References to resources living in the Postman workspace.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{id, name, uid}` as returned by Postman listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl RemoteRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), uid: None }
    }

    /// Whether `id` names this resource by id or uid.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.uid.as_deref() == Some(id)
    }
}

/// Resource id from a create response shaped either `{container: {id}}` or `{id}`.
pub fn extract_id(response: &Value, container: &str) -> Option<String> {
    let nested = response.get(container).and_then(|inner| inner.get("id"));
    nested.or_else(|| response.get("id")).and_then(id_as_string)
}

fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
