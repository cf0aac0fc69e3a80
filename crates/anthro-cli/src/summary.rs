use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use anthro_cli::types::{InspectReport, RunReport};
use anthro_model::GroupSummary;
use anthro_normalize::IrregularValues;

pub fn print_run_report(report: &RunReport) {
    println!(
        "Output: {} ({})",
        report.output.path.display(),
        report.output.format.extension()
    );
    println!("Computed at: {}", report.computed_at.to_rfc3339());
    println!(
        "Rows: {} biographies, {} results, {} joined, {} without measurements",
        report.bio_rows, report.result_rows, report.joined_rows, report.incomplete_rows
    );
    println!("{}", groups_table(&report.groups));
    if let Some(table) = irregular_table(&report.irregular) {
        println!("{table}");
    }
}

pub fn print_inspect_report(report: &InspectReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Biography rows"), Cell::new(report.bio_rows)]);
    table.add_row(vec![Cell::new("Event result rows"), Cell::new(report.result_rows)]);
    table.add_row(vec![Cell::new("Joined rows"), Cell::new(report.matched_rows)]);
    table.add_row(vec![
        Cell::new("Rows without height or weight"),
        count_cell(report.incomplete_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate athlete ids"),
        count_cell(report.duplicate_ids.count, Color::Red),
    ]);
    println!("{table}");
    if !report.duplicate_ids.is_empty() {
        println!("Duplicate ids: {}", report.duplicate_ids.sample.join(", "));
    }
    match irregular_table(&report.irregular) {
        Some(table) => println!("{table}"),
        None => println!("No irregular measurement values."),
    }
}

fn groups_table(groups: &[GroupSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sport"),
        header_cell("Medal"),
        header_cell("Sex"),
        header_cell("Country"),
        header_cell("Avg height"),
        header_cell("Avg weight"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for group in groups {
        let key = &group.key;
        table.add_row(vec![
            Cell::new(key.sport.as_deref().unwrap_or("-")).add_attribute(Attribute::Bold),
            optional_cell(key.medal.as_deref()),
            optional_cell(key.sex.as_deref()),
            optional_cell(key.country_noc.as_deref()),
            Cell::new(format!("{:.2}", group.avg_height)),
            Cell::new(format!("{:.2}", group.avg_weight)),
        ]);
    }
    table
}

fn irregular_table(reports: &[IrregularValues]) -> Option<Table> {
    if reports.iter().all(IrregularValues::is_empty) {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Distinct"),
        header_cell("Examples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for report in reports.iter().filter(|report| !report.is_empty()) {
        let examples = report
            .samples
            .iter()
            .map(|value| format!("{value:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&report.column).fg(Color::Blue),
            count_cell(report.total, Color::Yellow),
            Cell::new(examples),
        ]);
    }
    Some(table)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(color)
    }
}
