//! The environment table: environment name to opaque settings.

use crate::error::{ResolverError, ResolverResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping from environment name to its settings value.
///
/// The keys are the universe of valid environment names. Enumeration order
/// is insertion order (or document order when deserialized).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentTable {
    entries: IndexMap<String, Value>,
}

impl EnvironmentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an environment entry.
    pub fn insert(&mut self, name: impl Into<String>, settings: Value) -> Option<Value> {
        self.entries.insert(name.into(), settings)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, settings: Value) -> Self {
        self.insert(name, settings);
        self
    }

    /// Whether `name` is a valid environment.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Settings for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Environment names in table order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no environments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for EnvironmentTable {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl TryFrom<Value> for EnvironmentTable {
    type Error = ResolverError;

    fn try_from(value: Value) -> ResolverResult<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ResolverError::InvalidTable(format!(
                "expected an object of environments, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
