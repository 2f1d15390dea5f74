//! Integration tests for the composition session.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use vizspec_core::{
    Action, BufferEditor, ChangeKind, ChangeNotice, FieldMode, Session, SpecEditor,
};
use vizspec_model::{
    Aggregate, Encode, FieldCatalog, FieldDescriptor, FieldId, Filter, MainView, SpecSource,
    VisSpec,
};

fn fid(value: &str) -> FieldId {
    FieldId::new(value).expect("valid field id")
}

fn catalog() -> FieldCatalog {
    FieldCatalog::new(vec![
        FieldDescriptor::measure(fid("age"), "Age"),
        FieldDescriptor::measure(fid("income"), "Income"),
        FieldDescriptor::dimension(fid("city"), "City"),
    ])
    .expect("catalog")
}

fn session() -> Session {
    Session::new(catalog())
}

#[test]
fn scenario_init_filter_remove() {
    let mut session = session();
    assert!(session.main_view().is_none());

    session.init_with_single_field(fid("age"));
    assert_eq!(session.main_view().expect("view").fields, vec![fid("age")]);

    session.add_filter(Filter::range(fid("age"), 20.0, 30.0));
    assert_eq!(
        session.main_view().expect("view").filters,
        vec![Filter::range(fid("age"), 20.0, 30.0)]
    );

    session.remove_field("age");
    let view = session.main_view().expect("view");
    assert!(view.fields.is_empty());
    assert!(view.filters.is_empty());
    assert!(session.derived_spec().is_none());
    assert!(session.effective_spec().is_none());
}

#[test]
fn idempotent_add() {
    let mut session = session();
    session.init_with_single_field(fid("age"));
    session.add_field(fid("city"));
    session.add_field(fid("city"));
    let fields = &session.main_view().expect("view").fields;
    assert_eq!(fields.iter().filter(|f| **f == "city").count(), 1);
}

#[test]
fn cascading_remove() {
    let mut session = session();
    session.init_with_single_field(fid("city"));
    session.add_field(fid("age"));
    session.add_filter(Filter::range(fid("age"), 1.0, 9.0));
    session.add_encode(Encode::new(fid("age"), Aggregate::Mean));
    session.remove_field("age");
    let view = session.main_view().expect("view");
    assert!(!view.references("age"));
    assert_eq!(view.fields, vec![fid("city")]);
}

#[test]
fn init_is_noop_when_view_exists() {
    let mut session = session();
    session.init_with_single_field(fid("age"));
    let version = session.version();
    session.init_with_single_field(fid("city"));
    assert_eq!(session.main_view().expect("view").fields, vec![fid("age")]);
    assert_eq!(session.version(), version);
}

#[test]
fn add_field_without_view_is_noop() {
    let mut session = session();
    session.add_field(fid("age"));
    session.add_filter(Filter::range(fid("age"), 0.0, 1.0));
    session.add_encode(Encode::count());
    assert!(session.main_view().is_none());
    assert_eq!(session.version(), 0);
}

#[test]
fn single_slot_neighbor_selection() {
    let mut session = session();
    session.toggle_neighbor(fid("age"));
    session.toggle_neighbor(fid("age"));
    assert!(session.neighbors().is_empty());

    session.toggle_neighbor(fid("age"));
    session.toggle_neighbor(fid("city"));
    let selected: Vec<&FieldId> = session.neighbors().iter().collect();
    assert_eq!(selected, vec![&fid("city")]);
    assert_eq!(session.field_mode("city"), FieldMode::Wildcard);
    assert_eq!(session.field_mode("age"), FieldMode::Real);
}

#[test]
fn neighbors_survive_field_removal() {
    let mut session = session();
    session.append_field(fid("age"));
    session.toggle_neighbor(fid("age"));
    session.remove_field("age");
    assert!(session.neighbors().contains("age"));
}

#[test]
fn source_switch_guard_without_spec() {
    let mut session = session();
    session.edit_in_editor();
    assert_eq!(session.spec_source(), SpecSource::Default);
    assert!(session.editor().buffer().is_none());
    assert_eq!(session.version(), 0);
}

#[test]
fn round_trip_default_custom_default() {
    let mut session = session();
    session.append_field(fid("city"));
    session.append_field(fid("age"));
    let derived = session.derived_spec().cloned().expect("derived spec");

    session.edit_in_editor();
    assert_eq!(session.spec_source(), SpecSource::Custom);
    assert_eq!(session.editor().buffer(), Some(derived.clone()));

    session
        .edit_buffer(|editor: &mut BufferEditor| editor.set_text(r#"{"mark": "arc"}"#))
        .expect("valid edit");
    assert_eq!(
        session.effective_spec(),
        Some(VisSpec::new(json!({"mark": "arc"})).expect("spec"))
    );
    // Custom edits never flow back into the view.
    assert_eq!(session.derived_spec(), Some(&derived));

    session.exit_editor();
    assert_eq!(session.spec_source(), SpecSource::Default);
    assert_eq!(session.effective_spec(), Some(derived));
}

#[test]
fn second_edit_request_while_custom_is_noop() {
    let mut session = session();
    session.append_field(fid("age"));
    session.edit_in_editor();
    session
        .edit_buffer(|editor: &mut BufferEditor| editor.set_text(r#"{"mark": "rule"}"#))
        .expect("valid edit");
    session.edit_in_editor();
    assert_eq!(
        session.effective_spec().and_then(|s| s.mark().map(str::to_string)),
        Some("rule".to_string())
    );
}

#[test]
fn view_changes_while_custom_keep_buffer_authority() {
    let mut session = session();
    session.append_field(fid("age"));
    session.edit_in_editor();
    let buffer = session.editor().buffer();
    session.add_field(fid("city"));
    assert_eq!(session.effective_spec(), buffer);
    assert_ne!(session.derived_spec().cloned(), buffer);
}

#[test]
fn listeners_see_every_committed_change() {
    let mut session = session();
    let seen: Rc<RefCell<Vec<(ChangeKind, u64, bool)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |notice: &ChangeNotice| {
        sink.borrow_mut()
            .push((notice.kind, notice.version, notice.effective_spec.is_some()));
    });

    session.append_field(fid("age"));
    session.append_field(fid("age"));
    session.add_filter(Filter::set(fid("city"), ["Oslo"]));
    session.remove_field("age");
    session.remove_field("age");

    assert_eq!(
        *seen.borrow(),
        vec![
            (ChangeKind::Fields, 1, true),
            (ChangeKind::Filters, 2, true),
            (ChangeKind::Fields, 3, false),
        ]
    );
}

#[test]
fn buffer_edits_notify_only_when_custom() {
    let mut session = session();
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    session.subscribe(move |notice: &ChangeNotice| {
        if notice.kind == ChangeKind::EditorBuffer {
            *counter.borrow_mut() += 1;
        }
    });

    session
        .edit_buffer(|editor: &mut BufferEditor| editor.set_text(r#"{"mark": "bar"}"#))
        .expect("valid edit");
    assert_eq!(*count.borrow(), 0);

    session.append_field(fid("age"));
    session.edit_in_editor();
    session
        .edit_buffer(|editor: &mut BufferEditor| editor.set_text(r#"{"mark": "line"}"#))
        .expect("valid edit");
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn custom_deriver_is_never_called_for_empty_view() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let deriver = move |view: &MainView, _: &FieldCatalog| {
        *counter.borrow_mut() += 1;
        Some(VisSpec::new(json!({"fields": view.fields.len()})).expect("spec"))
    };
    let mut session = Session::with_parts(catalog(), deriver, BufferEditor::new());

    session.toggle_neighbor(fid("age"));
    assert_eq!(*calls.borrow(), 0);

    session.append_field(fid("age"));
    assert_eq!(*calls.borrow(), 1);

    session.remove_field("age");
    assert_eq!(*calls.borrow(), 1);
    assert!(session.derived_spec().is_none());
}

#[test]
fn stale_catalog_references_stop_rendering() {
    let mut session = session();
    session.append_field(fid("age"));
    session.add_filter(Filter::range(fid("age"), 1.0, 2.0));
    session.set_catalog(
        FieldCatalog::new(vec![FieldDescriptor::dimension(fid("city"), "City")])
            .expect("catalog"),
    );
    assert!(session.main_view().expect("view").has_field("age"));
    assert!(session.derived_spec().is_none());
    assert!(session.pills().fields.is_empty());
    assert!(session.pills().filters.is_empty());
}

#[test]
fn clear_resets_everything() {
    let mut session = session();
    session.append_field(fid("age"));
    session.toggle_neighbor(fid("age"));
    session.edit_in_editor();
    session.clear();
    assert!(session.main_view().is_none());
    assert!(session.neighbors().is_empty());
    assert_eq!(session.spec_source(), SpecSource::Default);

    let version = session.version();
    session.clear();
    assert_eq!(session.version(), version);
}

#[test]
fn actions_drive_the_same_commands() {
    let mut session = session();
    let actions: Vec<Action> = serde_json::from_value(json!([
        {"action": "append_field", "fid": "city"},
        {"action": "append_field", "fid": "age"},
        {"action": "add_encode", "encode": {"field": "age", "aggregate": "median"}},
        {"action": "add_encode", "encode": {"aggregate": "count"}},
        {"action": "remove_encode", "encode": {"aggregate": "count"}},
        {"action": "toggle_neighbor", "fid": "city"},
        {"action": "edit_in_editor"},
        {"action": "exit_editor"}
    ]))
    .expect("actions");
    for action in actions {
        session.apply(action);
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.spec_source, SpecSource::Default);
    assert_eq!(snapshot.neighbors, vec![fid("city")]);
    let view = snapshot.main_view.expect("view");
    assert_eq!(view.encodes, vec![Encode::new(fid("age"), Aggregate::Median)]);
    let spec = snapshot.effective_spec.expect("spec");
    assert_eq!(spec.as_value()["encoding"]["y"]["aggregate"], json!("median"));
}
