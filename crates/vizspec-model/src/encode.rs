//! Explicit encodings attached to the main view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::FieldId;

/// Aggregation applied to an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    #[default]
    Sum,
    Mean,
    Median,
    Count,
    Min,
    Max,
    Variance,
    Stdev,
}

impl Aggregate {
    pub const ALL: [Aggregate; 8] = [
        Self::Sum,
        Self::Mean,
        Self::Median,
        Self::Count,
        Self::Min,
        Self::Max,
        Self::Variance,
        Self::Stdev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
            Self::Variance => "variance",
            Self::Stdev => "stdev",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|agg| agg.as_str() == lowered)
            .ok_or_else(|| ModelError::UnknownAggregate(s.to_string()))
    }
}

/// An encoding slot.
///
/// `field == None` is the "count" placeholder; its aggregate is carried
/// along but never rendered. Equality is structural, so two identical
/// encodes cannot be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Encode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldId>,
    #[serde(default)]
    pub aggregate: Aggregate,
}

impl Encode {
    pub fn new(field: FieldId, aggregate: Aggregate) -> Self {
        Self {
            field: Some(field),
            aggregate,
        }
    }

    /// The count placeholder.
    pub fn count() -> Self {
        Self {
            field: None,
            aggregate: Aggregate::Count,
        }
    }

    pub fn is_count(&self) -> bool {
        self.field.is_none()
    }

    pub fn references(&self, fid: &str) -> bool {
        self.field.as_ref().is_some_and(|f| f == fid)
    }
}
