//! Spec derivation seam.
//!
//! Turning a main view into a renderable spec is owned by a collaborator;
//! the engine only needs `derive(view) -> Option<VisSpec>`. The
//! [`BasicSpecDeriver`] shipped here is a small deterministic mapping onto a
//! Vega-Lite subset, enough to drive the engine without a recommender.

use serde_json::{Map, Value, json};
use tracing::debug;
use vizspec_model::{
    AnalyticType, FieldCatalog, FieldDescriptor, FilterRule, MainView, ResolvedEncode, VisSpec,
};

use crate::settings::DeriveSettings;

/// Pure function from a main view to its renderable spec.
///
/// Implementations must return `None` when the view has no live fields.
pub trait SpecDeriver {
    fn derive(&self, view: &MainView, catalog: &FieldCatalog) -> Option<VisSpec>;
}

impl<F> SpecDeriver for F
where
    F: Fn(&MainView, &FieldCatalog) -> Option<VisSpec>,
{
    fn derive(&self, view: &MainView, catalog: &FieldCatalog) -> Option<VisSpec> {
        self(view, catalog)
    }
}

/// Encoding channels in assignment order.
const CHANNELS: [&str; 8] = [
    "x", "y", "color", "size", "opacity", "shape", "row", "column",
];

/// Deterministic Vega-Lite subset deriver.
///
/// Dimensions take channels first, then measures, then the count
/// placeholder. Measures are aggregated whenever a dimension groups them,
/// using an explicit encode's aggregate or the configured default.
#[derive(Debug, Clone, Default)]
pub struct BasicSpecDeriver {
    settings: DeriveSettings,
}

impl BasicSpecDeriver {
    pub fn new(settings: DeriveSettings) -> Self {
        Self { settings }
    }

    fn mark(&self, dimensions: usize, measures: usize) -> &str {
        if let Some(mark) = self.settings.mark.as_deref() {
            return mark;
        }
        match (dimensions, measures) {
            (0, 1) => "tick",
            (0, _) => "point",
            (_, 0) => "point",
            _ => "bar",
        }
    }
}

impl SpecDeriver for BasicSpecDeriver {
    fn derive(&self, view: &MainView, catalog: &FieldCatalog) -> Option<VisSpec> {
        let resolved = view.resolve(catalog);
        if resolved.is_empty() {
            return None;
        }

        let dimensions: Vec<&FieldDescriptor> = resolved
            .fields
            .iter()
            .copied()
            .filter(|f| f.analytic_type == AnalyticType::Dimension)
            .collect();
        let measures: Vec<&FieldDescriptor> = resolved
            .fields
            .iter()
            .copied()
            .filter(|f| f.analytic_type == AnalyticType::Measure)
            .collect();
        let has_count = resolved
            .encodes
            .iter()
            .any(|e| matches!(e, ResolvedEncode::Count));
        let grouped = !dimensions.is_empty();

        let mut slots: Vec<Value> = Vec::new();
        for dim in &dimensions {
            slots.push(json!({
                "field": dim.fid.as_str(),
                "type": "nominal",
                "title": dim.display_name(),
            }));
        }
        for measure in &measures {
            let explicit = resolved.encodes.iter().find_map(|e| match e {
                ResolvedEncode::Field {
                    descriptor,
                    aggregate,
                } if descriptor.fid == measure.fid => Some(*aggregate),
                _ => None,
            });
            let mut slot = json!({
                "field": measure.fid.as_str(),
                "type": "quantitative",
                "title": measure.display_name(),
            });
            let aggregate = match explicit {
                Some(aggregate) => Some(aggregate),
                None if grouped => Some(self.settings.default_aggregate),
                None => None,
            };
            if let (Some(aggregate), Some(obj)) = (aggregate, slot.as_object_mut()) {
                obj.insert("aggregate".to_string(), json!(aggregate.as_str()));
            }
            slots.push(slot);
        }
        if has_count {
            slots.push(json!({
                "aggregate": "count",
                "type": "quantitative",
                "title": "count",
            }));
        }

        if slots.len() > CHANNELS.len() {
            debug!(
                dropped = slots.len() - CHANNELS.len(),
                "more fields than channels"
            );
        }
        let encoding: Map<String, Value> = CHANNELS
            .iter()
            .zip(slots)
            .map(|(channel, slot)| ((*channel).to_string(), slot))
            .collect();

        // Sorted by JSON text so filter order never changes the spec.
        let mut transform: Vec<Value> = resolved
            .filters
            .iter()
            .map(|(filter, _)| match &filter.rule {
                FilterRule::Range { range } => {
                    json!({"filter": {"field": filter.fid.as_str(), "range": range}})
                }
                FilterRule::Set { values } => {
                    json!({"filter": {"field": filter.fid.as_str(), "oneOf": values}})
                }
            })
            .collect();
        transform.sort_by_cached_key(Value::to_string);

        let measure_count = measures.len() + usize::from(has_count);
        let mut spec = Map::new();
        spec.insert(
            "mark".to_string(),
            json!(self.mark(dimensions.len(), measure_count)),
        );
        spec.insert("encoding".to_string(), Value::Object(encoding));
        if !transform.is_empty() {
            spec.insert("transform".to_string(), Value::Array(transform));
        }
        Some(VisSpec::from_map(spec))
    }
}

#[cfg(test)]
mod tests {
    use vizspec_model::{Aggregate, Encode, FieldId, Filter};

    use super::*;

    fn fid(value: &str) -> FieldId {
        FieldId::new(value).unwrap()
    }

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FieldDescriptor::dimension(fid("city"), "City"),
            FieldDescriptor::measure(fid("age"), "Age"),
            FieldDescriptor::measure(fid("income"), "Income"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_view_derives_nothing() {
        let deriver = BasicSpecDeriver::default();
        assert!(deriver.derive(&MainView::default(), &catalog()).is_none());
        let stale = MainView::with_field(fid("gone"));
        assert!(deriver.derive(&stale, &catalog()).is_none());
    }

    #[test]
    fn dimension_and_measure_make_a_bar() {
        let mut view = MainView::with_field(fid("age"));
        view.fields.push(fid("city"));
        view.encodes.push(Encode::new(fid("age"), Aggregate::Mean));
        view.filters.push(Filter::range(fid("age"), 20.0, 30.0));

        let spec = BasicSpecDeriver::default().derive(&view, &catalog()).unwrap();
        assert_eq!(
            spec.into_value(),
            json!({
                "mark": "bar",
                "encoding": {
                    "x": {"field": "city", "type": "nominal", "title": "City"},
                    "y": {"field": "age", "type": "quantitative", "title": "Age", "aggregate": "mean"}
                },
                "transform": [{"filter": {"field": "age", "range": [20.0, 30.0]}}]
            })
        );
    }

    #[test]
    fn filter_order_does_not_change_transform() {
        let mut forward = MainView::with_field(fid("city"));
        forward.fields.push(fid("age"));
        forward.filters.push(Filter::range(fid("age"), 1.0, 2.0));
        forward.filters.push(Filter::set(fid("city"), ["Oslo"]));
        let mut reversed = forward.clone();
        reversed.filters.reverse();

        let deriver = BasicSpecDeriver::default();
        assert_eq!(
            deriver.derive(&forward, &catalog()),
            deriver.derive(&reversed, &catalog())
        );
    }

    #[test]
    fn ungrouped_measures_scatter_without_aggregate() {
        let mut view = MainView::with_field(fid("age"));
        view.fields.push(fid("income"));
        let spec = BasicSpecDeriver::default().derive(&view, &catalog()).unwrap();
        assert_eq!(spec.mark(), Some("point"));
        assert!(spec.as_value()["encoding"]["x"].get("aggregate").is_none());
    }

    #[test]
    fn count_placeholder_takes_a_channel() {
        let mut view = MainView::with_field(fid("city"));
        view.encodes.push(Encode::count());
        let spec = BasicSpecDeriver::default().derive(&view, &catalog()).unwrap();
        assert_eq!(spec.mark(), Some("bar"));
        assert_eq!(spec.as_value()["encoding"]["y"]["aggregate"], json!("count"));
    }

    #[test]
    fn mark_override_from_settings() {
        let deriver = BasicSpecDeriver::new(DeriveSettings {
            mark: Some("line".to_string()),
            ..DeriveSettings::default()
        });
        let view = MainView::with_field(fid("age"));
        assert_eq!(deriver.derive(&view, &catalog()).unwrap().mark(), Some("line"));
    }

    #[test]
    fn closures_are_derivers() {
        let deriver = |view: &MainView, _: &FieldCatalog| {
            (!view.is_empty()).then(|| VisSpec::from_map(Map::new()))
        };
        assert!(deriver.derive(&MainView::with_field(fid("age")), &catalog()).is_some());
    }
}
