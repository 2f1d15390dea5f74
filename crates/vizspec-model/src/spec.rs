//! Renderable specifications and the switches around them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A renderable chart specification (a JSON object).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisSpec(Value);

impl VisSpec {
    /// Wrap a JSON value, which must be an object.
    pub fn new(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self(value)),
            Value::Null => Err(ModelError::SpecNotObject("null")),
            Value::Bool(_) => Err(ModelError::SpecNotObject("boolean")),
            Value::Number(_) => Err(ModelError::SpecNotObject("number")),
            Value::String(_) => Err(ModelError::SpecNotObject("string")),
            Value::Array(_) => Err(ModelError::SpecNotObject("array")),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ModelError::InvalidSpec(e.to_string()))?;
        Self::new(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Top-level `mark` if it is a plain string or `{ "type": .. }` object.
    pub fn mark(&self) -> Option<&str> {
        match self.0.get("mark")? {
            Value::String(mark) => Some(mark),
            Value::Object(mark) => mark.get("type").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl fmt::Display for VisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grammar a [`VisSpec`] is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecType {
    /// Vega-Lite subset; what the engine derives.
    #[default]
    VegaSubset,
    GraphicWalker,
}

impl SpecType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VegaSubset => "vegaSubset",
            Self::GraphicWalker => "graphicWalker",
        }
    }
}

impl fmt::Display for SpecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which specification currently has render authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecSource {
    /// Derived from the main view.
    #[default]
    Default,
    /// Hand-edited buffer supersedes the derived spec.
    Custom,
}

impl SpecSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
