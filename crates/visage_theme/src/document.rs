//! Configuration documents
//!
//! An untyped mapping `group -> field -> raw value` as supplied by the caller.
//! Hosts hand it over either already parsed (a JSON object) or as JSON text.

use crate::error::{Result, ThemeError};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Caller-supplied customization, immutable once built
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigurationDocument {
    groups: Map<String, Value>,
}

impl ConfigurationDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(groups: Map<String, Value>) -> Self {
        Self { groups }
    }

    /// Accepts only a JSON object at the root
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(groups) => Ok(Self { groups }),
            other => Err(ThemeError::InvalidDocument(format!(
                "expected an object at the root, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ThemeError::InvalidDocument(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, name: &str) -> Option<&Value> {
        self.groups.get(name)
    }

    /// Groups in document order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.groups.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<Map<String, Value>> for ConfigurationDocument {
    fn from(groups: Map<String, Value>) -> Self {
        Self::from_map(groups)
    }
}

impl FromStr for ConfigurationDocument {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

/// Short name of a JSON value's shape, for diagnostics
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
