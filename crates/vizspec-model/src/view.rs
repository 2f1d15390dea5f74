//! The main view being composed.

use serde::{Deserialize, Serialize};

use crate::encode::{Aggregate, Encode};
use crate::field::{FieldCatalog, FieldDescriptor};
use crate::filter::Filter;
use crate::ids::FieldId;

/// Fields, filters and encodes making up one chart.
///
/// `fields` holds unique ids in insertion order. Filters and encodes may
/// repeat. Any id may go stale if the catalog changes underneath; use
/// [`MainView::resolve`] to read only the live entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainView {
    pub fields: Vec<FieldId>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub encodes: Vec<Encode>,
}

impl MainView {
    pub fn with_field(fid: FieldId) -> Self {
        Self {
            fields: vec![fid],
            ..Self::default()
        }
    }

    pub fn has_field(&self, fid: &str) -> bool {
        self.fields.iter().any(|f| f == fid)
    }

    /// True when the view has no fields, whatever filters or encodes remain.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any field, filter or encode refers to `fid`.
    pub fn references(&self, fid: &str) -> bool {
        self.has_field(fid)
            || self.filters.iter().any(|f| f.fid == fid)
            || self.encodes.iter().any(|e| e.references(fid))
    }

    /// Join the view against `catalog`, dropping stale references.
    pub fn resolve<'a>(&'a self, catalog: &'a FieldCatalog) -> ResolvedView<'a> {
        let fields = self
            .fields
            .iter()
            .filter_map(|fid| catalog.get(fid.as_str()))
            .collect();
        let filters = self
            .filters
            .iter()
            .filter_map(|filter| catalog.get(filter.fid.as_str()).map(|d| (filter, d)))
            .collect();
        let encodes = self
            .encodes
            .iter()
            .filter_map(|encode| match &encode.field {
                None => Some(ResolvedEncode::Count),
                Some(fid) => catalog.get(fid.as_str()).map(|descriptor| ResolvedEncode::Field {
                    descriptor,
                    aggregate: encode.aggregate,
                }),
            })
            .collect();
        ResolvedView {
            fields,
            filters,
            encodes,
        }
    }
}

/// A [`MainView`] joined with the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView<'a> {
    pub fields: Vec<&'a FieldDescriptor>,
    pub filters: Vec<(&'a Filter, &'a FieldDescriptor)>,
    pub encodes: Vec<ResolvedEncode<'a>>,
}

impl ResolvedView<'_> {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedEncode<'a> {
    Count,
    Field {
        descriptor: &'a FieldDescriptor,
        aggregate: Aggregate,
    },
}
