//! Labels for the field, filter and encode pills of the main view.
//!
//! Only live references get a pill; anything pointing at a field missing
//! from the catalog is skipped.

use serde::Serialize;
use vizspec_model::{AnalyticType, Encode, FieldCatalog, FieldId, MainView};

use crate::selection::{FieldMode, NeighborSelection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPill {
    pub fid: FieldId,
    pub label: String,
    pub analytic_type: AnalyticType,
    pub mode: FieldMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPill {
    pub fid: FieldId,
    pub label: String,
    pub analytic_type: AnalyticType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodePill {
    /// The encode this pill removes.
    pub encode: Encode,
    pub label: String,
    pub analytic_type: AnalyticType,
}

/// All pills of a view, in view order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pills {
    pub fields: Vec<FieldPill>,
    pub filters: Vec<FilterPill>,
    pub encodes: Vec<EncodePill>,
}

pub fn describe(view: &MainView, catalog: &FieldCatalog, neighbors: &NeighborSelection) -> Pills {
    let fields = view
        .fields
        .iter()
        .filter_map(|fid| catalog.get(fid.as_str()))
        .map(|field| FieldPill {
            fid: field.fid.clone(),
            label: field.display_name().to_string(),
            analytic_type: field.analytic_type,
            mode: neighbors.mode(field.fid.as_str()),
        })
        .collect();

    let filters = view
        .filters
        .iter()
        .filter_map(|filter| {
            let field = catalog.get(filter.fid.as_str())?;
            Some(FilterPill {
                fid: filter.fid.clone(),
                label: format!("{} ∈ {}", field.display_name(), filter.domain_label()),
                analytic_type: field.analytic_type,
            })
        })
        .collect();

    let encodes = view
        .encodes
        .iter()
        .filter_map(|encode| match &encode.field {
            None => Some(EncodePill {
                encode: encode.clone(),
                label: "count".to_string(),
                analytic_type: AnalyticType::Measure,
            }),
            Some(fid) => {
                let field = catalog.get(fid.as_str())?;
                Some(EncodePill {
                    encode: encode.clone(),
                    label: format!("{}({})", encode.aggregate, field.display_name()),
                    analytic_type: field.analytic_type,
                })
            }
        })
        .collect();

    Pills {
        fields,
        filters,
        encodes,
    }
}
