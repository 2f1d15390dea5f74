//! Invariants over random action sequences.

use std::collections::HashSet;

use proptest::prelude::*;

use vizspec_core::{Action, Session};
use vizspec_model::{
    Aggregate, AnalyticType, Encode, FieldCatalog, FieldDescriptor, FieldId, Filter,
};

const IDS: [&str; 5] = ["a", "b", "c", "d", "zz"];

fn fid(value: &str) -> FieldId {
    FieldId::new(value).expect("valid field id")
}

fn catalog() -> FieldCatalog {
    FieldCatalog::new(
        ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                let kind = if idx % 2 == 0 {
                    AnalyticType::Dimension
                } else {
                    AnalyticType::Measure
                };
                FieldDescriptor::new(fid(id), None, kind)
            })
            .collect(),
    )
    .expect("catalog")
}

fn any_fid() -> impl Strategy<Value = FieldId> {
    proptest::sample::select(IDS.to_vec()).prop_map(fid)
}

fn any_encode() -> impl Strategy<Value = Encode> {
    prop_oneof![
        Just(Encode::count()),
        (any_fid(), proptest::sample::select(Aggregate::ALL.to_vec()))
            .prop_map(|(f, agg)| Encode::new(f, agg)),
    ]
}

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        any_fid().prop_map(|fid| Action::InitWithSingleField { fid }),
        any_fid().prop_map(|fid| Action::AddField { fid }),
        any_fid().prop_map(|fid| Action::AppendField { fid }),
        any_fid().prop_map(|fid| Action::RemoveField { fid }),
        (any_fid(), 0.0f64..10.0).prop_map(|(fid, lo)| Action::AddFilter {
            filter: Filter::range(fid, lo, lo + 1.0)
        }),
        any_fid().prop_map(|fid| Action::RemoveFilter { fid }),
        any_encode().prop_map(|encode| Action::AddEncode { encode }),
        any_encode().prop_map(|encode| Action::RemoveEncode { encode }),
        any_fid().prop_map(|fid| Action::ToggleNeighbor { fid }),
        Just(Action::EditInEditor),
        Just(Action::ExitEditor),
    ]
}

proptest! {
    #[test]
    fn view_invariants_hold(actions in proptest::collection::vec(any_action(), 0..40)) {
        let mut session = Session::new(catalog());
        for action in actions {
            // Cascades apply only to fields that were members.
            let removed = match &action {
                Action::RemoveField { fid }
                    if session.main_view().is_some_and(|v| v.has_field(fid.as_str())) =>
                {
                    Some(fid.clone())
                }
                _ => None,
            };
            session.apply(action);

            prop_assert!(session.neighbors().len() <= 1);
            if let Some(view) = session.main_view() {
                let unique: HashSet<&FieldId> = view.fields.iter().collect();
                prop_assert_eq!(unique.len(), view.fields.len());
                prop_assert!(view.fields.iter().all(|f| f != "zz"));
                prop_assert!(view.filters.iter().all(|f| f.fid != "zz"));
                prop_assert!(view
                    .encodes
                    .iter()
                    .all(|e| e.field.as_ref().is_none_or(|f| view.has_field(f.as_str()))));
                if let Some(fid) = removed {
                    prop_assert!(!view.references(fid.as_str()));
                }
                prop_assert_eq!(session.derived_spec().is_some(), !view.is_empty());
            } else {
                prop_assert!(session.derived_spec().is_none());
            }
            if session.derived_spec().is_none() {
                prop_assert!(session.effective_spec().is_none());
            }
        }
    }

    #[test]
    fn version_counts_only_real_changes(actions in proptest::collection::vec(any_action(), 0..30)) {
        let mut session = Session::new(catalog());
        for action in actions {
            let before = session.snapshot();
            session.apply(action);
            let after = session.snapshot();
            let state_changed = before.main_view != after.main_view
                || before.spec_source != after.spec_source
                || before.neighbors != after.neighbors;
            if state_changed {
                prop_assert_eq!(after.version, before.version + 1);
            }
        }
    }
}
