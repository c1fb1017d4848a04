use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExpenseError, Result};
use crate::models::ExtractedFields;
use crate::parsers::rules::{first_letters, tail, Anchor, BlankFilter, Body, LineRule};
use crate::vendor::Vendor;

/// Ends the scan; the record locator closes this line.
const TERMINATOR: Anchor = Anchor::Contains(&["airline", "record", "locator"]);

const TOTAL: LineRule = LineRule {
    field: "total amount",
    anchor: Anchor::Contains(&["total amount"]),
    offset: 0,
};

const ROUTE: LineRule = LineRule {
    field: "route",
    anchor: Anchor::Contains(&["flight", "vendor", "status"]),
    offset: 1,
};

const TICKET: LineRule = LineRule {
    field: "ticket number",
    anchor: Anchor::Contains(&["electronic", "ticket", "number"]),
    offset: 1,
};

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9,.]{1,15}").expect("invalid amount regex"))
}

fn parse_total(line: &str) -> Result<(String, f64)> {
    let vendor = Vendor::Bcd;
    let currency = first_letters(tail(line, 10)).ok_or_else(|| ExpenseError::MalformedNumeric {
        vendor,
        field: "currency",
        token: line.to_string(),
    })?;
    let amount = amount_re()
        .find(tail(line, 20))
        .map(|m| m.as_str().replace(',', ""))
        .ok_or_else(|| ExpenseError::MalformedNumeric {
            vendor,
            field: "price",
            token: line.to_string(),
        })?;
    let price = amount
        .parse::<f64>()
        .map_err(|_| ExpenseError::MalformedNumeric {
            vendor,
            field: "price",
            token: amount.clone(),
        })?;
    Ok((currency.to_string(), price))
}

/// Second tab field of the flight line, e.g. "DXB-LHR".
fn parse_route(line: &str) -> Result<(String, String)> {
    let layout = |detail: String| ExpenseError::MalformedLayout {
        vendor: Vendor::Bcd,
        field: "route",
        detail,
    };
    let field = line
        .split('\t')
        .nth(1)
        .ok_or_else(|| layout(format!("no tab-separated route in {line:?}")))?;
    let parts: Vec<&str> = field.split('-').collect();
    match parts.as_slice() {
        [from, to] => Ok((from.to_string(), to.to_string())),
        _ => Err(layout(format!("expected \"<from>-<to>\", got {field:?}"))),
    }
}

fn parse_ticket(line: &str) -> String {
    line.replace('\t', " ")
        .split(' ')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn parse_record_locator(line: &str) -> Result<String> {
    tail(line, 15)
        .split_whitespace()
        .last()
        .map(|token| token.replace('\t', ""))
        .ok_or_else(|| ExpenseError::MalformedLayout {
            vendor: Vendor::Bcd,
            field: "record locator",
            detail: format!("no locator at the end of {line:?}"),
        })
}

pub fn parse(text: &str) -> Result<ExtractedFields> {
    let body = Body::split(text, BlankFilter::EmptyOrTab);
    let vendor = Vendor::Bcd;

    let end = body
        .position(&TERMINATOR, body.len())
        .ok_or(ExpenseError::AnchorNotFound {
            vendor,
            anchor: "airline record locator",
        })?;
    // Anchors after the terminator belong to another booking block.
    let scanned = end + 1;

    // Each block is read in order; a later leg or total replaces an earlier one.
    let mut fields = ExtractedFields::default();
    for line in TOTAL.each_within(&body, scanned, vendor)? {
        let (currency, price) = parse_total(line)?;
        fields.currency = Some(currency);
        fields.price = Some(price);
    }
    for line in ROUTE.each_within(&body, scanned, vendor)? {
        let (departure, arrival) = parse_route(line)?;
        fields.departure = Some(departure);
        fields.arrival = Some(arrival);
    }
    let ticket = TICKET
        .each_within(&body, scanned, vendor)?
        .into_iter()
        .map(parse_ticket)
        .last()
        .unwrap_or_default();
    let record = parse_record_locator(body.lines()[end])?;
    fields.ticket_reference = Some(format!("{ticket} - {record}"));

    Ok(fields)
}
