//! Neighbor (wildcard) highlight selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use vizspec_model::FieldId;

/// How a field pill is shown relative to the neighbor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Field is in the neighbor set.
    Wildcard,
    Real,
}

/// Set of fields in wildcard mode.
///
/// Stored as a set, but [`NeighborSelection::toggle`] keeps it to at most
/// one member. It is independent of the main view: removing a field from
/// the view does not touch this set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborSelection {
    keys: BTreeSet<FieldId>,
}

impl NeighborSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear when `fid` is the sole member, otherwise select only `fid`.
    pub fn toggle(&mut self, fid: FieldId) {
        if self.keys.len() == 1 && self.keys.contains(fid.as_str()) {
            self.keys.clear();
        } else {
            self.keys.clear();
            self.keys.insert(fid);
        }
    }

    pub fn contains(&self, fid: &str) -> bool {
        self.keys.contains(fid)
    }

    pub fn mode(&self, fid: &str) -> FieldMode {
        if self.contains(fid) {
            FieldMode::Wildcard
        } else {
            FieldMode::Real
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldId> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_keys = !self.keys.is_empty();
        self.keys.clear();
        had_keys
    }
}
