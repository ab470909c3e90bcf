//! Run summary table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tabcheck_model::{FileReport, FileStatus, RunSummary};

/// One row per file plus a totals row.
pub fn summary_table(reports: &[FileReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rule set"),
        header_cell("Status"),
        header_cell("Rules"),
        header_cell("Failed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for report in reports {
        let failed = report.failed_records().count();
        table.add_row(vec![
            Cell::new(report.file_name()),
            match &report.rule_set {
                Some(pattern) => Cell::new(pattern),
                None => dim_cell("-"),
            },
            status_cell(report.status),
            Cell::new(report.records.len()),
            count_cell(failed, Color::Red),
        ]);
    }

    let summary = RunSummary::from_reports(reports);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", summary.files))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} ok / {} failed / {} errored / {} unvalidated",
            summary.compliant, summary.non_compliant, summary.errored, summary.unvalidated
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

pub fn print_summary(reports: &[FileReport]) {
    println!("{}", summary_table(reports));
}

/// Compact style for small listings such as the rule catalogue.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: FileStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        FileStatus::Compliant => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        FileStatus::NonCompliant => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
        FileStatus::Errored => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        FileStatus::Unvalidated => cell.fg(Color::DarkGrey),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
