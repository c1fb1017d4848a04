use std::path::{Path, PathBuf};

use crate::batch::{parse_messages, FailurePolicy};
use crate::error::Result;
use crate::reader::{collect_messages, read_messages};
use crate::report::{format_summary, format_table, write_csv};
use crate::settings::load_settings;

pub fn run(dir: &str, output: Option<&str>, policy: Option<&str>, no_export: bool) -> Result<()> {
    let settings = load_settings();
    let policy = match policy {
        Some(p) => p.parse::<FailurePolicy>()?,
        None => settings.failure_policy,
    };

    let dir = Path::new(dir);
    let paths = collect_messages(dir)?;
    if paths.is_empty() {
        println!("No .eml messages found in {}", dir.display());
    }
    let messages = read_messages(&paths)?;
    let report = parse_messages(&messages, policy)?;

    if !report.table.is_empty() {
        println!("{}", format_table(&report.table, &settings.na_marker));
    }
    println!("{}", format_summary(&report));

    if !no_export {
        let path = output
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join(&settings.report_name));
        write_csv(&report.table, &path, &settings.na_marker)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
