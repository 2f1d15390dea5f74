//! Raw spec editor seam.
//!
//! When the user chooses "edit in editor", the derived spec is handed to a
//! [`SpecEditor`]. While the spec source is `custom`, renders read the
//! editor's buffer instead of the derived spec.

use tracing::debug;
use vizspec_model::{SpecType, VisSpec};

use crate::error::{CoreError, Result};

/// Collaborator that holds an editable copy of a spec.
pub trait SpecEditor {
    /// Replace the buffer with a copy of `spec`.
    fn sync(&mut self, spec_type: SpecType, spec: VisSpec);

    /// The current edited spec, if any.
    fn buffer(&self) -> Option<VisSpec>;
}

/// In-memory editor that accepts JSON text edits.
///
/// Text that does not parse is rejected and the last good buffer is kept.
#[derive(Debug, Clone, Default)]
pub struct BufferEditor {
    spec_type: SpecType,
    spec: Option<VisSpec>,
    text: String,
}

impl BufferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec_type(&self) -> SpecType {
        self.spec_type
    }

    /// Raw text as last typed (or synced).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply a text edit.
    ///
    /// The text is always stored; the buffer only moves when it parses.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.text = text.into();
        let spec = VisSpec::from_json_str(&self.text).map_err(CoreError::Editor)?;
        self.spec = Some(spec);
        Ok(())
    }
}

impl SpecEditor for BufferEditor {
    fn sync(&mut self, spec_type: SpecType, spec: VisSpec) {
        debug!(%spec_type, "editor synced");
        self.spec_type = spec_type;
        self.text = spec.to_pretty_json();
        self.spec = Some(spec);
    }

    fn buffer(&self) -> Option<VisSpec> {
        self.spec.clone()
    }
}
