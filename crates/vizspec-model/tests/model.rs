use proptest::prelude::*;

use vizspec_model::{
    Aggregate, AnalyticType, Encode, FieldCatalog, FieldDescriptor, FieldId, Filter, MainView,
};

fn fid(value: &str) -> FieldId {
    FieldId::new(value).expect("valid field id")
}

#[test]
fn catalog_deserializes_from_descriptor_list() {
    let catalog: FieldCatalog = serde_json::from_str(
        r#"[
            {"fid": "age", "name": "Age", "analyticType": "measure"},
            {"fid": "city", "analyticType": "dimension"}
        ]"#,
    )
    .expect("parse catalog");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("city").expect("city").display_name(), "city");
    assert_eq!(
        catalog.get("age").expect("age").analytic_type,
        AnalyticType::Measure
    );
}

#[test]
fn catalog_deserialization_rejects_duplicates() {
    let parsed: Result<FieldCatalog, _> = serde_json::from_str(
        r#"[
            {"fid": "age", "analyticType": "measure"},
            {"fid": "age", "analyticType": "dimension"}
        ]"#,
    );
    let err = parsed.expect_err("duplicate fid");
    assert!(err.to_string().contains("duplicate field id"));
}

#[test]
fn main_view_json_shape() {
    let view = MainView {
        fields: vec![fid("age"), fid("city")],
        filters: vec![Filter::range(fid("age"), 20.0, 30.0)],
        encodes: vec![Encode::new(fid("age"), Aggregate::Mean), Encode::count()],
    };
    let json = serde_json::to_value(&view).expect("serialize view");
    assert_eq!(
        json,
        serde_json::json!({
            "fields": ["age", "city"],
            "filters": [{"fid": "age", "kind": "range", "range": [20.0, 30.0]}],
            "encodes": [
                {"field": "age", "aggregate": "mean"},
                {"aggregate": "count"}
            ]
        })
    );
    let back: MainView = serde_json::from_value(json).expect("deserialize view");
    assert_eq!(back, view);
}

#[test]
fn main_view_defaults_missing_collections() {
    let view: MainView = serde_json::from_str(r#"{"fields": ["age"]}"#).expect("parse view");
    assert!(view.filters.is_empty());
    assert!(view.encodes.is_empty());
    assert!(view.has_field("age"));
}

#[test]
fn loaded_field_ids_are_trimmed_and_non_empty() {
    let view: MainView = serde_json::from_str(
        r#"{"fields": [" age "], "filters": [{"fid": "age ", "kind": "set", "values": ["x"]}]}"#,
    )
    .expect("parse view");
    assert_eq!(view.fields, vec![fid("age")]);
    assert_eq!(view.filters[0].fid, fid("age"));

    assert!(serde_json::from_str::<MainView>(r#"{"fields": [""]}"#).is_err());
    let blank_catalog: Result<FieldCatalog, _> =
        serde_json::from_str(r#"[{"fid": "  ", "analyticType": "measure"}]"#);
    assert!(blank_catalog.is_err());
}

proptest! {
    #[test]
    fn resolved_view_never_contains_unknown_fields(
        ids in proptest::collection::vec("[a-e]", 0..8),
    ) {
        let catalog = FieldCatalog::new(vec![
            FieldDescriptor::measure(fid("a"), "A"),
            FieldDescriptor::dimension(fid("c"), "C"),
        ])
        .expect("catalog");
        let view = MainView {
            fields: ids.iter().map(|id| fid(id)).collect(),
            filters: ids.iter().map(|id| Filter::range(fid(id), 0.0, 1.0)).collect(),
            encodes: ids.iter().map(|id| Encode::new(fid(id), Aggregate::Sum)).collect(),
        };
        let resolved = view.resolve(&catalog);
        prop_assert!(resolved.fields.iter().all(|d| catalog.contains(d.fid.as_str())));
        prop_assert!(resolved.filters.iter().all(|(f, _)| catalog.contains(f.fid.as_str())));
        let live = ids.iter().filter(|id| catalog.contains(id)).count();
        prop_assert_eq!(resolved.fields.len(), live);
        prop_assert_eq!(resolved.encodes.len(), live);
    }
}
