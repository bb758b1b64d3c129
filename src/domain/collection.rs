//! Postman collection documents, as far as the onboarding workflow touches them.
//!
//! Only the top-level event list is modelled. Everything else (`info`, `item`,
//! `variable`, ...) round-trips untouched through the flattened `rest` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trigger phase of a pre-request hook.
pub const PREREQUEST: &str = "prerequest";
/// Script language tag used by Postman.
pub const JAVASCRIPT: &str = "text/javascript";

/// A Postman collection (v2.1 schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A hook attached to a collection, folder, or request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,
    #[serde(default)]
    pub script: Script,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Script body as an ordered list of source lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "type", default = "default_script_type")]
    pub script_type: String,
    #[serde(default)]
    pub exec: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

fn default_script_type() -> String {
    JAVASCRIPT.to_string()
}

impl Event {
    /// A pre-request hook running `lines`.
    pub fn prerequest(lines: Vec<String>) -> Self {
        Self {
            listen: PREREQUEST.to_string(),
            script: Script { script_type: JAVASCRIPT.to_string(), exec: lines, rest: Map::new() },
            rest: Map::new(),
        }
    }

    pub fn is_prerequest(&self) -> bool {
        self.listen == PREREQUEST
    }
}

impl Collection {
    /// Collection display name from `info.name`.
    pub fn name(&self) -> Option<&str> {
        self.rest.get("info")?.get("name")?.as_str()
    }

    /// Replace every top-level pre-request hook with one running `lines`.
    ///
    /// Other hooks keep their relative order; the new hook is appended last.
    pub fn replace_prerequest(&mut self, lines: Vec<String>) {
        self.event.retain(|event| !event.is_prerequest());
        self.event.push(Event::prerequest(lines));
    }

    /// Top-level pre-request hooks.
    pub fn prerequest_events(&self) -> impl Iterator<Item = &Event> {
        self.event.iter().filter(|event| event.is_prerequest())
    }
}
