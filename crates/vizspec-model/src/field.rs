//! Field descriptors and the read-only field catalog.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::FieldId;

/// Analytic role of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticType {
    /// Categorical or temporal attribute used for grouping.
    Dimension,
    /// Quantitative attribute that can be aggregated.
    Measure,
}

impl AnalyticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::Measure => "measure",
        }
    }
}

impl fmt::Display for AnalyticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column-like attribute of the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub fid: FieldId,
    #[serde(default)]
    pub name: Option<String>,
    pub analytic_type: AnalyticType,
}

impl FieldDescriptor {
    pub fn new(fid: FieldId, name: Option<String>, analytic_type: AnalyticType) -> Self {
        Self {
            fid,
            name,
            analytic_type,
        }
    }

    pub fn dimension(fid: FieldId, name: impl Into<String>) -> Self {
        Self::new(fid, Some(name.into()), AnalyticType::Dimension)
    }

    pub fn measure(fid: FieldId, name: impl Into<String>) -> Self {
        Self::new(fid, Some(name.into()), AnalyticType::Measure)
    }

    /// Name shown to users; falls back to the id when the name is missing or empty.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.fid.as_str(),
        }
    }
}

/// Ordered, read-only collection of field descriptors with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldDescriptor>", into = "Vec<FieldDescriptor>")]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting duplicate field ids.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.fid.as_str()) {
                return Err(ModelError::DuplicateField(field.fid.to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn get(&self, fid: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.fid == fid)
    }

    pub fn contains(&self, fid: &str) -> bool {
        self.get(fid).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<FieldDescriptor>> for FieldCatalog {
    type Error = ModelError;

    fn try_from(fields: Vec<FieldDescriptor>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<FieldCatalog> for Vec<FieldDescriptor> {
    fn from(catalog: FieldCatalog) -> Self {
        catalog.fields
    }
}
