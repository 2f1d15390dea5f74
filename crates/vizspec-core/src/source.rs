//! Render authority switch between the derived spec and the editor buffer.

use tracing::{debug, info};
use vizspec_model::{SpecSource, SpecType, VisSpec};

use crate::editor::SpecEditor;

/// Tracks which spec renders and performs the two legal transitions.
///
/// Custom edits are never merged back into the main view; leaving `custom`
/// simply hands authority back to the derived spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecSourceSwitch {
    source: SpecSource,
}

impl SpecSourceSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> SpecSource {
        self.source
    }

    pub fn is_custom(&self) -> bool {
        self.source == SpecSource::Custom
    }

    /// `default -> custom`. The editor receives a copy of `derived`.
    ///
    /// Absorbed when there is no derived spec or the source is already
    /// `custom`.
    pub fn enter_custom(&mut self, derived: Option<&VisSpec>, editor: &mut dyn SpecEditor) -> bool {
        if self.is_custom() {
            debug!("spec source already custom");
            return false;
        }
        let Some(spec) = derived else {
            debug!("no derived spec, staying on default source");
            return false;
        };
        editor.sync(SpecType::VegaSubset, spec.clone());
        self.source = SpecSource::Custom;
        info!("spec source switched to custom");
        true
    }

    /// `custom -> default`. The editor buffer is left as is but no longer renders.
    pub fn exit_custom(&mut self) -> bool {
        if !self.is_custom() {
            return false;
        }
        self.source = SpecSource::Default;
        info!("spec source switched to default");
        true
    }

    /// The spec a renderer should draw.
    ///
    /// Nothing renders without a derived spec, even in `custom`.
    pub fn effective(&self, derived: Option<&VisSpec>, editor: &dyn SpecEditor) -> Option<VisSpec> {
        let derived = derived?;
        match self.source {
            SpecSource::Default => Some(derived.clone()),
            SpecSource::Custom => editor.buffer(),
        }
    }
}
