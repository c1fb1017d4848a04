use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExpenseError, Result};
use crate::models::ExtractedFields;
use crate::parsers::rules::{first_letters, Anchor, BlankFilter, Body, LineRule};
use crate::vendor::Vendor;

/// The fare sits on the line after "Switch payment method".
const FARE: LineRule = LineRule {
    field: "fare",
    anchor: Anchor::Prefix("switch"),
    offset: 1,
};

const INVITE: Anchor = Anchor::Contains(&["invite your friends and family"]);

// Pickup and drop-off are counted back from the referral footer. This
// matches one receipt template only: a map caption or an extra line
// between the trip block and the footer shifts both.
const DEPARTURE: LineRule = LineRule {
    field: "departure",
    anchor: INVITE,
    offset: -4,
};

const ARRIVAL: LineRule = LineRule {
    field: "arrival",
    anchor: INVITE,
    offset: -2,
};

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{1,5}\.[0-9]{0,2}").expect("invalid price regex"))
}

fn location(line: &str) -> String {
    line.trim().replace('\t', "")
}

fn parse_fare(line: &str) -> Result<(String, f64)> {
    let vendor = Vendor::UberTravel;
    let currency = first_letters(line).ok_or_else(|| ExpenseError::MalformedNumeric {
        vendor,
        field: "currency",
        token: line.to_string(),
    })?;
    let price = price_re()
        .find(line)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| ExpenseError::MalformedNumeric {
            vendor,
            field: "price",
            token: line.to_string(),
        })?;
    Ok((currency.to_string(), price))
}

pub fn parse(text: &str) -> Result<ExtractedFields> {
    let body = Body::split(text, BlankFilter::Empty);
    let vendor = Vendor::UberTravel;

    // Every "Switch" block is read; the last one is the charged fare.
    let mut fare = None;
    for line in FARE.each(&body, vendor)? {
        fare = Some(parse_fare(line)?);
    }
    let (currency, price) = fare.ok_or_else(|| FARE.not_found(vendor))?;

    let departure = DEPARTURE.require_last(&body, vendor)?;
    let arrival = ARRIVAL.require_last(&body, vendor)?;

    Ok(ExtractedFields {
        currency: Some(currency),
        price: Some(price),
        departure: Some(location(departure)),
        arrival: Some(location(arrival)),
        ..ExtractedFields::default()
    })
}
