use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};
use csv::WriterBuilder;

use crate::batch::BatchReport;
use crate::error::Result;
use crate::fmt::amount;
use crate::models::{ExpenseTable, COLUMNS};

// ---------------------------------------------------------------------------
// Spreadsheet output
// ---------------------------------------------------------------------------

/// Write the table as CSV, one row per record, missing values as `na`.
pub fn write_csv(table: &ExpenseTable, path: &Path, na: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in table {
        writer.write_record(record.cells(na))?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal output
// ---------------------------------------------------------------------------

pub fn format_table(table: &ExpenseTable, na: &str) -> String {
    let mut out = Table::new();
    out.set_header(COLUMNS.to_vec());
    for record in table {
        let mut cells = record.cells(na);
        // Price column, index 5
        if let Some(price) = record.fields.price {
            cells[5] = amount(price);
        }
        out.add_row(cells.into_iter().map(Cell::new).collect::<Vec<_>>());
    }
    out.to_string()
}

pub fn format_summary(report: &BatchReport) -> String {
    let mut lines = vec![format!(
        "{} rows, {} skipped (unknown sender)",
        report.table.len(),
        report.skipped
    )];
    if !report.failures.is_empty() {
        lines.push(format!("{}", "Could not parse:".red().bold()));
        for failure in &report.failures {
            lines.push(format!("  {} [{}]: {}", failure.source, failure.vendor, failure.reason));
        }
    }
    lines.join("\n")
}
