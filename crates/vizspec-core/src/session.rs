//! The composition session.
//!
//! # Architecture
//!
//! A [`Session`] is the single authoritative owner of:
//!
//! - the main view ([`ViewState`]),
//! - the spec source ([`SpecSourceSwitch`]),
//! - the neighbor selection ([`NeighborSelection`]),
//!
//! plus the collaborators it reads from: the field catalog, a
//! [`SpecDeriver`] and a [`SpecEditor`]. It is passed by reference to
//! whatever drives it; there is no global instance.
//!
//! Commands return nothing. A command that changes state recomputes the
//! derived spec before returning, bumps [`Session::version`] and notifies
//! listeners; a command whose precondition fails is absorbed silently.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use vizspec_model::{
    Encode, FieldCatalog, FieldId, Filter, MainView, SpecSource, SpecType, VisSpec,
};

use crate::action::Action;
use crate::collection::CollectionStore;
use crate::derive::{BasicSpecDeriver, SpecDeriver};
use crate::describe::{Pills, describe};
use crate::editor::{BufferEditor, SpecEditor};
use crate::notify::{ChangeKind, ChangeListener, ChangeNotice, ListenerId, Notifier};
use crate::selection::{FieldMode, NeighborSelection};
use crate::settings::SessionSettings;
use crate::source::SpecSourceSwitch;
use crate::view_state::ViewState;

/// Read-only copy of the session's observable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub version: u64,
    pub main_view: Option<MainView>,
    pub spec_source: SpecSource,
    pub neighbors: Vec<FieldId>,
    pub derived_spec: Option<VisSpec>,
    pub effective_spec: Option<VisSpec>,
}

pub struct Session<E: SpecEditor = BufferEditor> {
    catalog: FieldCatalog,
    view: ViewState,
    source: SpecSourceSwitch,
    neighbors: NeighborSelection,
    deriver: Box<dyn SpecDeriver>,
    editor: E,
    derived: Option<VisSpec>,
    version: u64,
    notifier: Notifier,
}

impl Session<BufferEditor> {
    /// Session with the basic deriver and an in-memory editor.
    pub fn new(catalog: FieldCatalog) -> Self {
        Self::with_parts(catalog, BasicSpecDeriver::default(), BufferEditor::new())
    }

    /// Session configured from settings.
    pub fn from_settings(catalog: FieldCatalog, settings: &SessionSettings) -> Self {
        Self::with_parts(
            catalog,
            BasicSpecDeriver::new(settings.derive.clone()),
            BufferEditor::new(),
        )
    }
}

impl<E: SpecEditor> Session<E> {
    pub fn with_parts(
        catalog: FieldCatalog,
        deriver: impl SpecDeriver + 'static,
        editor: E,
    ) -> Self {
        Self {
            catalog,
            view: ViewState::new(),
            source: SpecSourceSwitch::new(),
            neighbors: NeighborSelection::new(),
            deriver: Box::new(deriver),
            editor,
            derived: None,
            version: 0,
            notifier: Notifier::new(),
        }
    }

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn main_view(&self) -> Option<&MainView> {
        self.view.main_view()
    }

    /// Whether a view with at least one field exists.
    pub fn has_view(&self) -> bool {
        self.view.has_view()
    }

    pub fn spec_source(&self) -> SpecSource {
        self.source.source()
    }

    pub fn neighbors(&self) -> &NeighborSelection {
        &self.neighbors
    }

    pub fn field_mode(&self, fid: &str) -> FieldMode {
        self.neighbors.mode(fid)
    }

    /// Spec derived from the main view, `None` when the view has no fields.
    pub fn derived_spec(&self) -> Option<&VisSpec> {
        self.derived.as_ref()
    }

    /// Spec a renderer should draw, honoring the spec source.
    pub fn effective_spec(&self) -> Option<VisSpec> {
        self.source.effective(self.derived.as_ref(), &self.editor)
    }

    /// Whether "edit in editor" would currently be accepted.
    pub fn can_edit(&self) -> bool {
        self.derived.is_some() && !self.source.is_custom()
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Number of committed changes so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn pills(&self) -> Pills {
        self.main_view()
            .map(|view| describe(view, &self.catalog, &self.neighbors))
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: self.version,
            main_view: self.main_view().cloned(),
            spec_source: self.spec_source(),
            neighbors: self.neighbors.iter().cloned().collect(),
            derived_spec: self.derived.clone(),
            effective_spec: self.effective_spec(),
        }
    }

    // =========================================================================
    // VIEW COMMANDS
    // =========================================================================

    pub fn init_with_single_field(&mut self, fid: FieldId) {
        if !self.knows(&fid) {
            return;
        }
        if self.view.init_with_single_field(fid) {
            self.commit(ChangeKind::Fields);
        }
    }

    pub fn add_field(&mut self, fid: FieldId) {
        if !self.knows(&fid) {
            return;
        }
        if self.view.add_field(fid) {
            self.commit(ChangeKind::Fields);
        }
    }

    /// Init the view with `fid` when none exists, otherwise add it.
    pub fn append_field(&mut self, fid: FieldId) {
        if self.view.has_view() {
            self.add_field(fid);
        } else {
            self.init_with_single_field(fid);
        }
    }

    /// Remove a field along with the filters and encodes that use it.
    pub fn remove_field(&mut self, fid: &str) {
        if self.view.remove_field(fid) {
            self.commit(ChangeKind::Fields);
        }
    }

    pub fn add_filter(&mut self, filter: Filter) {
        if !self.knows(&filter.fid) {
            return;
        }
        if self.view.add_filter(filter) {
            self.commit(ChangeKind::Filters);
        }
    }

    pub fn remove_filter(&mut self, fid: &str) {
        if self.view.remove_filter(fid) {
            self.commit(ChangeKind::Filters);
        }
    }

    pub fn add_encode(&mut self, encode: Encode) {
        if let Some(field) = &encode.field
            && !self.knows(field)
        {
            return;
        }
        if self.view.add_encode(encode) {
            self.commit(ChangeKind::Encodes);
        }
    }

    pub fn remove_encode(&mut self, encode: &Encode) {
        if self.view.remove_encode(encode) {
            self.commit(ChangeKind::Encodes);
        }
    }

    // =========================================================================
    // SELECTION AND SOURCE COMMANDS
    // =========================================================================

    pub fn toggle_neighbor(&mut self, fid: FieldId) {
        self.neighbors.toggle(fid);
        self.commit(ChangeKind::Neighbors);
    }

    /// `default -> custom`: hand the derived spec to the editor.
    pub fn edit_in_editor(&mut self) {
        if self
            .source
            .enter_custom(self.derived.as_ref(), &mut self.editor)
        {
            self.commit(ChangeKind::SpecSource);
        }
    }

    /// `custom -> default`.
    pub fn exit_editor(&mut self) {
        if self.source.exit_custom() {
            self.commit(ChangeKind::SpecSource);
        }
    }

    /// Change the editor buffer.
    ///
    /// Listeners hear about it only while the buffer has render authority.
    pub fn edit_buffer<R>(&mut self, edit: impl FnOnce(&mut E) -> R) -> R {
        let before = self.editor.buffer();
        let result = edit(&mut self.editor);
        if self.source.is_custom() && self.editor.buffer() != before {
            self.commit(ChangeKind::EditorBuffer);
        }
        result
    }

    // =========================================================================
    // SESSION COMMANDS
    // =========================================================================

    /// Swap the catalog. References that go stale stay in the view but stop
    /// rendering.
    pub fn set_catalog(&mut self, catalog: FieldCatalog) {
        if catalog == self.catalog {
            return;
        }
        self.catalog = catalog;
        self.commit(ChangeKind::Catalog);
    }

    /// Back to an empty view, `default` source and no neighbors.
    pub fn clear(&mut self) {
        let had_view = self.view.clear();
        let was_custom = self.source.exit_custom();
        let had_neighbors = self.neighbors.clear();
        if had_view || was_custom || had_neighbors {
            self.commit(ChangeKind::Reset);
        }
    }

    pub fn apply(&mut self, action: Action) {
        debug!(action = action.name(), "applying action");
        match action {
            Action::InitWithSingleField { fid } => self.init_with_single_field(fid),
            Action::AddField { fid } => self.add_field(fid),
            Action::AppendField { fid } => self.append_field(fid),
            Action::RemoveField { fid } => self.remove_field(fid.as_str()),
            Action::AddFilter { filter } => self.add_filter(filter),
            Action::RemoveFilter { fid } => self.remove_filter(fid.as_str()),
            Action::AddEncode { encode } => self.add_encode(encode),
            Action::RemoveEncode { encode } => self.remove_encode(&encode),
            Action::ToggleNeighbor { fid } => self.toggle_neighbor(fid),
            Action::EditInEditor => self.edit_in_editor(),
            Action::ExitEditor => self.exit_editor(),
            Action::Clear => self.clear(),
        }
    }

    // =========================================================================
    // OBSERVATION
    // =========================================================================

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // =========================================================================
    // COLLECTION
    // =========================================================================

    /// Whether the current derived view is in `store`.
    ///
    /// The store sees the full catalog, the derived spec as a Vega subset
    /// and the view's filters.
    pub fn is_collected(&self, store: &dyn CollectionStore) -> bool {
        match (self.main_view(), self.derived.as_ref()) {
            (Some(view), Some(spec)) => store.contains(
                self.catalog.as_slice(),
                spec,
                SpecType::VegaSubset,
                &view.filters,
            ),
            _ => false,
        }
    }

    /// Flip membership of the current derived view; absorbed without a spec.
    pub fn toggle_collected(&self, store: &mut dyn CollectionStore) {
        match (self.main_view(), self.derived.as_ref()) {
            (Some(view), Some(spec)) => store.toggle(
                self.catalog.as_slice(),
                spec,
                SpecType::VegaSubset,
                &view.filters,
            ),
            _ => debug!("no derived spec, ignoring collection toggle"),
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn knows(&self, fid: &FieldId) -> bool {
        let known = self.catalog.contains(fid.as_str());
        if !known {
            debug!(%fid, "field not in catalog, ignoring");
        }
        known
    }

    fn derive(&self) -> Option<VisSpec> {
        let view = self.view.main_view().filter(|view| !view.is_empty())?;
        self.deriver.derive(view, &self.catalog)
    }

    fn commit(&mut self, kind: ChangeKind) {
        self.derived = self.derive();
        self.version += 1;
        let notice = ChangeNotice {
            kind,
            version: self.version,
            effective_spec: self.effective_spec(),
        };
        debug!(
            ?kind,
            version = self.version,
            has_spec = self.derived.is_some(),
            "session changed"
        );
        self.notifier.notify(&notice);
    }
}

impl<E: SpecEditor> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("main_view", &self.view.main_view())
            .field("spec_source", &self.source.source())
            .field("neighbors", &self.neighbors)
            .field("has_derived_spec", &self.derived.is_some())
            .field("listeners", &self.notifier.len())
            .finish()
    }
}
