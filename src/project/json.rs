// json.rs - JSON-backed project record with field-by-disposition merge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chassis::{self, ChassisEntry, CHASSIS_FIELD};
use super::traits::AggregateRecord;

/// Reserved top-level field carrying project metadata
pub const PROJECT_FIELD: &str = "_project";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFlags {
    pub error: bool,
    pub warning: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    pub name: String,
    pub description: String,
    pub date: String,
    pub tool_version: String,
    /// Input documents folded into this project, sorted
    pub sources: Vec<String>,
    pub flags: ProjectFlags,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonProject {
    pub meta: ProjectMeta,
    data: Map<String, Value>,
}

impl JsonProject {
    /// Create an empty project stamped with the current time
    pub fn new(name: &str, description: &str) -> Self {
        Self::stamped(name, description, Utc::now())
    }

    pub fn stamped(name: &str, description: &str, date: DateTime<Utc>) -> Self {
        Self {
            meta: ProjectMeta {
                name: name.to_string(),
                description: description.to_string(),
                date: date.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                tool_version: crate::VERSION.to_string(),
                ..ProjectMeta::default()
            },
            data: Map::new(),
        }
    }

    /// Rebuild a project from a previously serialized document
    pub fn from_document(mut document: Map<String, Value>) -> Self {
        let meta = document
            .remove(PROJECT_FIELD)
            .and_then(|v| serde_json::from_value::<ProjectMeta>(v).ok())
            .unwrap_or_default();
        Self {
            meta,
            data: canonical_map(document),
        }
    }

    /// Merged capture data, without the metadata block
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    fn add_source(&mut self, source: &str) {
        if !self.meta.sources.iter().any(|s| s == source) {
            self.meta.sources.push(source.to_string());
            self.meta.sources.sort();
        }
    }
}

impl AggregateRecord for JsonProject {
    fn merge_into(&mut self, source: &str, mut document: Map<String, Value>) {
        // A previously combined project: carry its provenance, not its metadata
        if let Some(Value::Object(previous)) = document.remove(PROJECT_FIELD) {
            if let Some(Value::Array(sources)) = previous.get("sources") {
                for s in sources.iter().filter_map(Value::as_str) {
                    self.add_source(s);
                }
            }
        }
        self.add_source(source);

        let mut conflicts = Vec::new();
        merge_map("", &mut self.data, document, &mut conflicts);

        for path in conflicts {
            self.set_warning(&format!(
                "{}: conflicting value for '{}', keeping the existing value",
                source, path
            ));
        }
    }

    fn serialize(&self) -> Value {
        let mut document = self.data.clone();
        // ProjectMeta is plain strings, bools and vectors
        let meta = serde_json::to_value(&self.meta).unwrap_or(Value::Null);
        document.insert(PROJECT_FIELD.to_string(), meta);
        Value::Object(document)
    }

    fn chassis(&self) -> Vec<ChassisEntry<'_>> {
        chassis::entries(self.data.get(CHASSIS_FIELD))
    }

    fn set_error(&mut self, message: &str) {
        log::error!("{}", message);
        self.meta.flags.error = true;
        self.meta.messages.push(format!("ERROR: {}", message));
    }

    fn set_warning(&mut self, message: &str) {
        log::warn!("{}", message);
        self.meta.flags.warning = true;
        self.meta.messages.push(format!("WARNING: {}", message));
    }

    fn has_error(&self) -> bool {
        self.meta.flags.error
    }

    fn has_warning(&self) -> bool {
        self.meta.flags.warning
    }

    fn name(&self) -> &str {
        &self.meta.name
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", parent, key)
    }
}

fn merge_map(
    path: &str,
    target: &mut Map<String, Value>,
    incoming: Map<String, Value>,
    conflicts: &mut Vec<String>,
) {
    for (key, value) in incoming {
        let field_path = join_path(path, &key);
        match target.get_mut(&key) {
            Some(existing) => merge_value(&field_path, existing, value, conflicts),
            None => {
                target.insert(key, canonical(value));
            }
        }
    }
}

/// Objects merge key-wise, arrays by set union, scalars keep the first value seen
fn merge_value(path: &str, target: &mut Value, incoming: Value, conflicts: &mut Vec<String>) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            merge_map(path, existing, incoming, conflicts);
        }
        (Value::Array(existing), Value::Array(incoming)) => {
            existing.extend(incoming.into_iter().map(canonical));
            canonical_array(existing);
        }
        (existing, incoming) => {
            if *existing != canonical(incoming) {
                conflicts.push(path.to_string());
            }
        }
    }
}

/// Arrays are kept sorted by their compact JSON text with duplicates removed
fn canonical(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(canonical_map(map)),
        Value::Array(items) => {
            let mut items: Vec<Value> = items.into_iter().map(canonical).collect();
            canonical_array(&mut items);
            Value::Array(items)
        }
        scalar => scalar,
    }
}

fn canonical_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (k, canonical(v))).collect()
}

fn canonical_array(items: &mut Vec<Value>) {
    items.sort_by_cached_key(|v| v.to_string());
    items.dedup();
}
