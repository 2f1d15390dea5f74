use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vizspec_cli::replay::ReplayReport;
use vizspec_core::FieldMode;
use vizspec_model::{AnalyticType, FieldCatalog};

pub fn print_report(report: &ReplayReport) {
    let snapshot = &report.snapshot;
    println!("Steps: {} ({} changes)", report.steps, report.changes);
    if report.rejected_edits > 0 {
        println!("Rejected editor edits: {}", report.rejected_edits);
    }

    let mut state = Table::new();
    state.set_header(vec![header_cell("State"), header_cell("Value")]);
    apply_table_style(&mut state);
    state.add_row(vec![Cell::new("Version"), Cell::new(snapshot.version)]);
    state.add_row(vec![
        Cell::new("Spec source"),
        Cell::new(snapshot.spec_source),
    ]);
    let neighbors: Vec<&str> = snapshot.neighbors.iter().map(|fid| fid.as_str()).collect();
    state.add_row(vec![
        Cell::new("Neighbor"),
        Cell::new(if neighbors.is_empty() {
            "-".to_string()
        } else {
            neighbors.join(", ")
        }),
    ]);
    state.add_row(vec![
        Cell::new("Collected"),
        flag_cell(report.collected),
    ]);
    println!("{state}");

    if snapshot.main_view.is_none() {
        println!("No main view.");
        return;
    }

    let mut pills = Table::new();
    pills.set_header(vec![
        header_cell("Slot"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Mode"),
    ]);
    apply_table_style(&mut pills);
    for pill in &report.pills.fields {
        pills.add_row(vec![
            Cell::new("field"),
            Cell::new(&pill.label),
            type_cell(pill.analytic_type),
            mode_cell(pill.mode),
        ]);
    }
    for pill in &report.pills.filters {
        pills.add_row(vec![
            Cell::new("filter"),
            Cell::new(&pill.label),
            type_cell(pill.analytic_type),
            Cell::new(""),
        ]);
    }
    for pill in &report.pills.encodes {
        pills.add_row(vec![
            Cell::new("encode"),
            Cell::new(&pill.label),
            type_cell(pill.analytic_type),
            Cell::new(""),
        ]);
    }
    println!("{pills}");

    match &snapshot.effective_spec {
        Some(spec) => println!("{}", spec.to_pretty_json()),
        None => println!("Nothing to render."),
    }
}

pub fn print_catalog(catalog: &FieldCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Name"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (index, field) in catalog.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(field.fid.as_str()),
            Cell::new(field.display_name()),
            type_cell(field.analytic_type),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn type_cell(analytic_type: AnalyticType) -> Cell {
    match analytic_type {
        AnalyticType::Dimension => Cell::new("dimension").fg(Color::Blue),
        AnalyticType::Measure => Cell::new("measure").fg(Color::Green),
    }
}

fn mode_cell(mode: FieldMode) -> Cell {
    match mode {
        FieldMode::Real => Cell::new("real"),
        FieldMode::Wildcard => Cell::new("wildcard")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}
