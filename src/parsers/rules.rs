//! Anchor-and-offset rules describing where a receipt template keeps its data.
//!
//! Every vendor template is a list of lines; an anchor picks the line that
//! signals nearby data and an offset picks the data line relative to it.
//! Template changes should only touch the rule constants in each parser.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExpenseError, Result};
use crate::vendor::Vendor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlankFilter {
    /// Drop empty lines only.
    Empty,
    /// Drop empty lines and lines made of a single tab.
    EmptyOrTab,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Trimmed, lowercased line equals `text` and the raw line is shorter
    /// than `max_len`.
    ExactLine { text: &'static str, max_len: usize },
    /// Trimmed, lowercased line starts with `text`.
    Prefix(&'static str),
    /// Lowercased line contains every substring, in any order.
    Contains(&'static [&'static str]),
}

impl Anchor {
    pub fn matches(&self, line: &str) -> bool {
        let folded = line.trim().to_lowercase();
        match self {
            Self::ExactLine { text, max_len } => folded == *text && line.len() < *max_len,
            Self::Prefix(text) => folded.starts_with(text),
            Self::Contains(parts) => {
                let lower = line.to_lowercase();
                parts.iter().all(|p| lower.contains(p))
            }
        }
    }
}

/// A data line located `offset` lines away from a line matching `anchor`.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub field: &'static str,
    pub anchor: Anchor,
    pub offset: isize,
}

impl LineRule {
    /// Data line for the first anchor match. `Ok(None)` when the anchor is
    /// absent; an error when the anchor is present but the offset runs off
    /// the body.
    pub fn resolve<'a>(&self, body: &Body<'a>, vendor: Vendor) -> Result<Option<&'a str>> {
        self.resolve_within(body, body.len(), vendor)
    }

    /// Like `resolve`, but only anchors before line `end` count.
    pub fn resolve_within<'a>(
        &self,
        body: &Body<'a>,
        end: usize,
        vendor: Vendor,
    ) -> Result<Option<&'a str>> {
        body.position(&self.anchor, end)
            .map(|index| self.target(body, index, vendor))
            .transpose()
    }

    /// Same as `resolve`, but a missing anchor is an error.
    pub fn require<'a>(&self, body: &Body<'a>, vendor: Vendor) -> Result<&'a str> {
        self.resolve(body, vendor)?
            .ok_or_else(|| self.not_found(vendor))
    }

    /// Data lines for every anchor match before line `end`, in body order.
    /// Any match whose offset runs off the body is an error.
    pub fn each_within<'a>(
        &self,
        body: &Body<'a>,
        end: usize,
        vendor: Vendor,
    ) -> Result<Vec<&'a str>> {
        body.positions(&self.anchor, end)
            .into_iter()
            .map(|index| self.target(body, index, vendor))
            .collect()
    }

    pub fn each<'a>(&self, body: &Body<'a>, vendor: Vendor) -> Result<Vec<&'a str>> {
        self.each_within(body, body.len(), vendor)
    }

    /// Data line for the last anchor match; earlier matches must still land
    /// inside the body.
    pub fn require_last<'a>(&self, body: &Body<'a>, vendor: Vendor) -> Result<&'a str> {
        self.each(body, vendor)?
            .pop()
            .ok_or_else(|| self.not_found(vendor))
    }

    pub fn not_found(&self, vendor: Vendor) -> ExpenseError {
        ExpenseError::AnchorNotFound {
            vendor,
            anchor: self.field,
        }
    }

    fn target<'a>(&self, body: &Body<'a>, index: usize, vendor: Vendor) -> Result<&'a str> {
        body.line_at(index, self.offset)
            .ok_or_else(|| ExpenseError::MalformedLayout {
                vendor,
                field: self.field,
                detail: format!("no line {} away from anchor line {}", self.offset, index + 1),
            })
    }
}

/// A message body split into the non-blank lines the parsers scan.
#[derive(Debug, Clone)]
pub struct Body<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Body<'a> {
    pub fn split(text: &'a str, filter: BlankFilter) -> Self {
        let lines = text
            .lines()
            .filter(|line| match filter {
                BlankFilter::Empty => !line.is_empty(),
                BlankFilter::EmptyOrTab => !line.is_empty() && *line != "\t",
            })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Index of the first line before `end` matching the anchor.
    pub fn position(&self, anchor: &Anchor, end: usize) -> Option<usize> {
        self.lines
            .iter()
            .take(end)
            .position(|line| anchor.matches(line))
    }

    /// Indices of every line before `end` matching the anchor.
    pub fn positions(&self, anchor: &Anchor, end: usize) -> Vec<usize> {
        self.lines
            .iter()
            .take(end)
            .enumerate()
            .filter(|(_, line)| anchor.matches(line))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn line_at(&self, index: usize, offset: isize) -> Option<&'a str> {
        let target = index.checked_add_signed(offset)?;
        self.lines.get(target).copied()
    }
}

/// First run of ASCII letters, e.g. the currency code in "AED27.50".
pub fn first_letters(text: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("invalid letters regex"))
        .find(text)
        .map(|m| m.as_str())
}

/// The last `n` characters of a line.
pub fn tail(line: &str, n: usize) -> &str {
    let count = line.chars().count();
    if count <= n {
        return line;
    }
    let start = line
        .char_indices()
        .nth(count - n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &line[start..]
}
