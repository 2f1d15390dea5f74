use anyhow::{Context, Result};
use tracing::{info, info_span};

use vizspec_cli::replay::{ReplayReport, ScriptStep, ToolStep, load_catalog, load_script, replay};
use vizspec_core::{MemoryCollection, Session, SessionSettings};
use vizspec_model::FieldCatalog;

use crate::cli::{FieldsArgs, ReplayArgs};

pub fn run_fields(args: &FieldsArgs) -> Result<FieldCatalog> {
    load_catalog(&args.catalog)
}

pub fn run_replay(args: &ReplayArgs) -> Result<ReplayReport> {
    let span = info_span!("replay", script = %args.script.display());
    let _guard = span.enter();

    let settings = match &args.settings {
        Some(path) => SessionSettings::load_from(path)
            .with_context(|| format!("load settings {}", path.display()))?,
        None => SessionSettings::load_or_default(&SessionSettings::config_path()),
    };
    let catalog = load_catalog(&args.catalog)?;
    let steps = load_script(&args.script)?;
    info!(fields = catalog.len(), steps = steps.len(), "inputs loaded");

    let collection_path = args
        .collection
        .clone()
        .or_else(|| settings.collection.path.clone());
    let mut store = match &collection_path {
        Some(path) if path.exists() => MemoryCollection::load(path)
            .with_context(|| format!("load collection {}", path.display()))?,
        _ => MemoryCollection::new(),
    };
    let toggles = steps
        .iter()
        .any(|step| matches!(step, ScriptStep::Tool(ToolStep::ToggleCollected)));

    let mut session = Session::from_settings(catalog, &settings);
    let report = replay(&mut session, steps, &mut store);

    if toggles && let Some(path) = &collection_path {
        store
            .save(path)
            .with_context(|| format!("save collection {}", path.display()))?;
        info!(path = %path.display(), entries = store.len(), "collection saved");
    }
    Ok(report)
}
