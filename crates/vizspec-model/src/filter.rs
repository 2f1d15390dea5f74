//! View filters.
//!
//! A filter restricts one field either to a numeric range or to a set of
//! discrete values. The shape is carried by [`FilterRule`], so a range filter
//! can never hold a value list and vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::FieldId;

/// Discriminant of a [`FilterRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Range,
    Set,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Set => "set",
        }
    }
}

/// A single value in a set filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Shape of a filter, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterRule {
    /// Inclusive `[min, max]` interval.
    Range { range: [f64; 2] },
    /// Ordered list of accepted values.
    Set { values: Vec<FilterValue> },
}

impl FilterRule {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Range { .. } => FilterKind::Range,
            Self::Set { .. } => FilterKind::Set,
        }
    }
}

/// A filter over one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub fid: FieldId,
    #[serde(flatten)]
    pub rule: FilterRule,
}

impl Filter {
    pub fn range(fid: FieldId, min: f64, max: f64) -> Self {
        Self {
            fid,
            rule: FilterRule::Range { range: [min, max] },
        }
    }

    pub fn set<V: Into<FilterValue>>(fid: FieldId, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            fid,
            rule: FilterRule::Set {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.rule.kind()
    }

    /// Right-hand side of the filter as shown to users: `[min,max]` or `{a,b}`.
    pub fn domain_label(&self) -> String {
        match &self.rule {
            FilterRule::Range { range: [min, max] } => format!("[{min},{max}]"),
            FilterRule::Set { values } => {
                let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("{{{}}}", joined.join(","))
            }
        }
    }
}
