use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, Result};
use crate::models::Message;

/// Every `.eml` file directly inside `dir`, sorted by file name.
pub fn collect_messages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .map_or(false, |e| e.eq_ignore_ascii_case("eml"))
        {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(feature = "eml")]
pub fn read_message(path: &Path) -> Result<Message> {
    let source = source_name(path);
    let bytes = std::fs::read(path)?;
    let parsed = mail_parser::MessageParser::default()
        .parse(&bytes)
        .ok_or_else(|| ExpenseError::Mail(source.clone()))?;

    let sender = parsed
        .from()
        .and_then(|addrs| addrs.first())
        .map(|addr| match (addr.name(), addr.address()) {
            (Some(name), Some(address)) => format!("{name} <{address}>"),
            (Some(name), None) => name.to_string(),
            (None, Some(address)) => address.to_string(),
            (None, None) => String::new(),
        })
        .unwrap_or_default();
    let subject = parsed.subject().map(|s| s.to_string()).unwrap_or_default();
    let date = parsed
        .date()
        .and_then(|d| chrono::DateTime::parse_from_rfc3339(&d.to_rfc3339()).ok());
    let body = parsed
        .body_text(0)
        .or_else(|| parsed.body_html(0))
        .map(|s| s.to_string())
        .unwrap_or_default();

    Ok(Message {
        source,
        sender,
        subject,
        date,
        body,
    })
}

#[cfg(not(feature = "eml"))]
pub fn read_message(path: &Path) -> Result<Message> {
    Err(ExpenseError::Mail(format!(
        "{} (built without the eml feature)",
        source_name(path)
    )))
}

pub fn read_messages(paths: &[PathBuf]) -> Result<Vec<Message>> {
    paths.iter().map(|p| read_message(p)).collect()
}
