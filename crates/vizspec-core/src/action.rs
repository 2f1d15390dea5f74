//! User actions as data.
//!
//! Each variant maps onto one session command, so UIs, scripts and tests
//! drive the engine through the same path (see `Session::apply`).

use serde::{Deserialize, Serialize};
use vizspec_model::{Encode, FieldId, Filter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    InitWithSingleField { fid: FieldId },
    AddField { fid: FieldId },
    /// Init when no view exists, add otherwise.
    AppendField { fid: FieldId },
    RemoveField { fid: FieldId },
    AddFilter { filter: Filter },
    RemoveFilter { fid: FieldId },
    AddEncode { encode: Encode },
    RemoveEncode { encode: Encode },
    ToggleNeighbor { fid: FieldId },
    /// Switch render authority to the editor buffer.
    EditInEditor,
    ExitEditor,
    Clear,
}

impl Action {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitWithSingleField { .. } => "init_with_single_field",
            Self::AddField { .. } => "add_field",
            Self::AppendField { .. } => "append_field",
            Self::RemoveField { .. } => "remove_field",
            Self::AddFilter { .. } => "add_filter",
            Self::RemoveFilter { .. } => "remove_filter",
            Self::AddEncode { .. } => "add_encode",
            Self::RemoveEncode { .. } => "remove_encode",
            Self::ToggleNeighbor { .. } => "toggle_neighbor",
            Self::EditInEditor => "edit_in_editor",
            Self::ExitEditor => "exit_editor",
            Self::Clear => "clear",
        }
    }
}
