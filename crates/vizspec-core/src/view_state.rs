//! Ownership and mutation of the main view.
//!
//! [`ViewState`] is the only place a [`MainView`] is changed. Every command
//! returns `true` when it changed the view and `false` when it was absorbed
//! as a no-op (missing view, duplicate field, unknown entry).

use tracing::debug;
use vizspec_model::{Encode, FieldId, Filter, MainView};

/// Holder of the optional main view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    main_view: Option<MainView>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_view(&self) -> Option<&MainView> {
        self.main_view.as_ref()
    }

    /// Whether a view with at least one field exists.
    pub fn has_view(&self) -> bool {
        self.main_view.as_ref().is_some_and(|view| !view.is_empty())
    }

    /// Start a view holding only `fid`.
    ///
    /// Only valid while no view exists or the existing one has no fields.
    pub fn init_with_single_field(&mut self, fid: FieldId) -> bool {
        if self.has_view() {
            debug!(%fid, "view already initialized, ignoring init");
            return false;
        }
        debug!(%fid, "initializing main view");
        self.main_view = Some(MainView::with_field(fid));
        true
    }

    /// Append `fid` to the view's fields, keeping them unique.
    pub fn add_field(&mut self, fid: FieldId) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            debug!(%fid, "no main view, ignoring add_field");
            return false;
        };
        if view.has_field(fid.as_str()) {
            debug!(%fid, "field already in view");
            return false;
        }
        view.fields.push(fid);
        true
    }

    /// Remove `fid` and every filter or encode that refers to it.
    pub fn remove_field(&mut self, fid: &str) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            return false;
        };
        if !view.has_field(fid) {
            debug!(fid, "field not in view, ignoring remove_field");
            return false;
        }
        view.fields.retain(|f| f != fid);
        let filters_before = view.filters.len();
        let encodes_before = view.encodes.len();
        view.filters.retain(|f| f.fid != fid);
        view.encodes.retain(|e| !e.references(fid));
        debug!(
            fid,
            filters_dropped = filters_before - view.filters.len(),
            encodes_dropped = encodes_before - view.encodes.len(),
            "removed field"
        );
        true
    }

    /// Append a filter. Several filters may target the same field.
    pub fn add_filter(&mut self, filter: Filter) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            debug!(fid = %filter.fid, "no main view, ignoring add_filter");
            return false;
        };
        view.filters.push(filter);
        true
    }

    /// Remove every filter on `fid`.
    pub fn remove_filter(&mut self, fid: &str) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            return false;
        };
        let before = view.filters.len();
        view.filters.retain(|f| f.fid != fid);
        before != view.filters.len()
    }

    /// Append an encode.
    ///
    /// A field encode is accepted only when its field is in the view; the
    /// count placeholder is always accepted.
    pub fn add_encode(&mut self, encode: Encode) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            debug!("no main view, ignoring add_encode");
            return false;
        };
        if let Some(field) = &encode.field
            && !view.has_field(field.as_str())
        {
            debug!(%field, "encode field is not in the view");
            return false;
        }
        view.encodes.push(encode);
        true
    }

    /// Remove the first encode structurally equal to `encode`.
    pub fn remove_encode(&mut self, encode: &Encode) -> bool {
        let Some(view) = self.main_view.as_mut() else {
            return false;
        };
        match view.encodes.iter().position(|e| e == encode) {
            Some(idx) => {
                view.encodes.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop the view entirely.
    pub fn clear(&mut self) -> bool {
        self.main_view.take().is_some()
    }
}
