//! Scripted replay of user actions against a composition session.
//!
//! A script is a JSON array of steps. Most steps are engine actions
//! (`{"action": "append_field", "fid": "age"}`); two extra steps stand in for
//! things a UI does outside the action set: typing into the spec editor and
//! pressing the collect button.

use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace, warn};

use vizspec_core::{
    Action, BufferEditor, ChangeNotice, CollectionStore, Pills, Session, SessionSnapshot,
};
use vizspec_model::FieldCatalog;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Engine(Action),
    Tool(ToolStep),
}

/// Steps that drive the session's collaborators rather than its state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ToolStep {
    /// Replace the editor text; only parseable text moves the buffer.
    EditText { text: String },
    /// Flip membership of the current view in the collection.
    ToggleCollected,
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Engine(action) => action.name(),
            Self::Tool(ToolStep::EditText { .. }) => "edit_text",
            Self::Tool(ToolStep::ToggleCollected) => "toggle_collected",
        }
    }
}

/// Result of a replay run.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: usize,
    /// Committed state changes observed through the session's listeners.
    pub changes: usize,
    /// Editor texts that failed to parse.
    pub rejected_edits: usize,
    pub collected: bool,
    pub snapshot: SessionSnapshot,
    pub pills: Pills,
}

pub fn load_catalog(path: &Path) -> Result<FieldCatalog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read catalog {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse catalog {}", path.display()))
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("parse script {}", path.display()))
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    let steps: Vec<serde_json::Value> =
        serde_json::from_str(text).context("script is not a JSON array")?;
    steps
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .with_context(|| format!("step {index} is not a known action"))
        })
        .collect()
}

/// Run `steps` in order against `session`.
///
/// Editor text that fails to parse is counted and logged, not fatal, the same
/// way an interactive editor keeps the last good buffer.
pub fn replay(
    session: &mut Session<BufferEditor>,
    steps: Vec<ScriptStep>,
    store: &mut dyn CollectionStore,
) -> ReplayReport {
    let changes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&changes);
    let listener = session.subscribe(move |_: &ChangeNotice| counter.set(counter.get() + 1));

    let total = steps.len();
    let mut rejected_edits = 0usize;
    for (index, step) in steps.into_iter().enumerate() {
        let span = info_span!("step", index, name = step.name());
        let _guard = span.enter();
        match step {
            ScriptStep::Engine(action) => session.apply(action),
            ScriptStep::Tool(ToolStep::EditText { text }) => {
                if let Err(error) = session.edit_buffer(|editor| editor.set_text(text)) {
                    warn!(%error, "editor text rejected");
                    rejected_edits += 1;
                }
            }
            ScriptStep::Tool(ToolStep::ToggleCollected) => session.toggle_collected(store),
        }
        debug!(version = session.version(), "step applied");
        trace!(snapshot = ?session.snapshot(), "state after step");
    }
    session.unsubscribe(listener);

    let report = ReplayReport {
        steps: total,
        changes: changes.get(),
        rejected_edits,
        collected: session.is_collected(&*store),
        snapshot: session.snapshot(),
        pills: session.pills(),
    };
    info!(
        steps = report.steps,
        changes = report.changes,
        version = report.snapshot.version,
        "replay finished"
    );
    report
}
