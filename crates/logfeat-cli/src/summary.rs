use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use logfeat_cli::pipeline::RunOutcome;

pub fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!("Object: {}/{}", report.bucket, report.object);
    println!(
        "Destination: {} (schema v{})",
        report.destination, report.schema_version
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Duration (ms)"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for stage in &report.stages {
        table.add_row(vec![
            Cell::new(&stage.stage),
            rows_cell(stage.rows),
            Cell::new(stage.duration_ms),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.total_duration_ms()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if let Some(receipt) = &outcome.receipt {
        println!(
            "Loaded {} rows into {} ({} rows total)",
            receipt.appended_rows, receipt.table, receipt.table_rows
        );
    } else if report.dry_run {
        println!(
            "Dry run: validated and coerced {} rows, nothing loaded",
            report.input_rows
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rows_cell(rows: Option<usize>) -> Cell {
    match rows {
        Some(count) => Cell::new(count),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
