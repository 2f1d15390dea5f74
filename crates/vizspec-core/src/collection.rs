//! Collection (favorites) membership.
//!
//! A view is "collected" when the fingerprint of `(fields, spec, spec type,
//! filters)` is in the store. The fingerprint is canonical:
//!
//! - fields are ordered by id,
//! - filters are ordered by their canonical JSON text,
//! - JSON objects are written with sorted keys and no whitespace.
//!
//! So two views that differ only in field or filter order share one entry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use vizspec_model::{FieldDescriptor, Filter, SpecType, VisSpec};

use crate::error::{CoreError, Result};

/// Store that answers "is this exact view collected" and flips membership.
pub trait CollectionStore {
    fn contains(
        &self,
        fields: &[FieldDescriptor],
        spec: &VisSpec,
        spec_type: SpecType,
        filters: &[Filter],
    ) -> bool;

    fn toggle(
        &mut self,
        fields: &[FieldDescriptor],
        spec: &VisSpec,
        spec_type: SpecType,
        filters: &[Filter],
    );
}

/// Lowercase hex SHA-256 of the canonical view content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(
        fields: &[FieldDescriptor],
        spec: &VisSpec,
        spec_type: SpecType,
        filters: &[Filter],
    ) -> Self {
        let mut field_parts: Vec<String> = fields.iter().map(canonical_of).collect();
        field_parts.sort();
        let mut filter_parts: Vec<String> = filters.iter().map(canonical_of).collect();
        filter_parts.sort();

        let mut hasher = Sha256::new();
        hasher.update(b"fields\n");
        for part in &field_parts {
            hasher.update(part.as_bytes());
            hasher.update(b"\n");
        }
        hasher.update(b"spec\n");
        let mut spec_text = String::new();
        write_canonical(spec.as_value(), &mut spec_text);
        hasher.update(spec_text.as_bytes());
        hasher.update(b"\ntype\n");
        hasher.update(spec_type.as_str().as_bytes());
        hasher.update(b"\nfilters\n");
        for part in &filter_parts {
            hasher.update(part.as_bytes());
            hasher.update(b"\n");
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_of<T: Serialize>(item: &T) -> String {
    let mut out = String::new();
    match serde_json::to_value(item) {
        Ok(value) => write_canonical(&value, &mut out),
        Err(error) => debug!(%error, "unserializable collection part"),
    }
    out
}

/// Compact JSON with object keys sorted at every level.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (idx, key) in keys.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// A collected view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub fingerprint: Fingerprint,
    pub fields: Vec<FieldDescriptor>,
    pub spec: VisSpec,
    pub spec_type: SpecType,
    pub filters: Vec<Filter>,
    pub saved_at: DateTime<Utc>,
}

/// In-memory collection store with JSON persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    entries: BTreeMap<Fingerprint, CollectionEntry>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&CollectionEntry> {
        self.entries.get(fingerprint)
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> Vec<&CollectionEntry> {
        let mut entries: Vec<&CollectionEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            a.saved_at
                .cmp(&b.saved_at)
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        entries
    }

    /// Load a store from a JSON file written by [`MemoryCollection::save`].
    ///
    /// Fingerprints are recomputed so files from older canonicalization
    /// rules still match.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let stored: Vec<CollectionEntry> =
            serde_json::from_str(&content).map_err(|source| CoreError::CollectionFormat {
                path: path.to_path_buf(),
                source,
            })?;
        let entries = stored
            .into_iter()
            .map(|mut entry| {
                entry.fingerprint =
                    Fingerprint::of(&entry.fields, &entry.spec, entry.spec_type, &entry.filters);
                (entry.fingerprint.clone(), entry)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let entries = self.entries();
        let content = serde_json::to_string_pretty(&entries).map_err(|source| {
            CoreError::CollectionFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, content).map_err(|source| CoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CollectionStore for MemoryCollection {
    fn contains(
        &self,
        fields: &[FieldDescriptor],
        spec: &VisSpec,
        spec_type: SpecType,
        filters: &[Filter],
    ) -> bool {
        self.entries
            .contains_key(&Fingerprint::of(fields, spec, spec_type, filters))
    }

    fn toggle(
        &mut self,
        fields: &[FieldDescriptor],
        spec: &VisSpec,
        spec_type: SpecType,
        filters: &[Filter],
    ) {
        let fingerprint = Fingerprint::of(fields, spec, spec_type, filters);
        if self.entries.remove(&fingerprint).is_some() {
            info!(%fingerprint, "removed view from collection");
            return;
        }
        info!(%fingerprint, "added view to collection");
        self.entries.insert(
            fingerprint.clone(),
            CollectionEntry {
                fingerprint,
                fields: fields.to_vec(),
                spec: spec.clone(),
                spec_type,
                filters: filters.to_vec(),
                saved_at: Utc::now(),
            },
        );
    }
}
