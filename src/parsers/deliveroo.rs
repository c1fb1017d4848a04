use crate::error::{ExpenseError, Result};
use crate::models::ExtractedFields;
use crate::parsers::rules::{Anchor, BlankFilter, Body, LineRule};
use crate::vendor::Vendor;

/// "Total" on a short line of its own, amount on the next line.
const TOTAL: LineRule = LineRule {
    field: "total",
    anchor: Anchor::ExactLine {
        text: "total",
        max_len: 10,
    },
    offset: 1,
};

pub fn parse(text: &str) -> Result<ExtractedFields> {
    let body = Body::split(text, BlankFilter::Empty);
    let line = TOTAL.require(&body, Vendor::Deliveroo)?.trim();

    let mut tokens = line.split(' ');
    let (currency, price) = match (tokens.next(), tokens.next()) {
        (Some(currency), Some(price)) => (currency, price),
        _ => {
            return Err(ExpenseError::MalformedLayout {
                vendor: Vendor::Deliveroo,
                field: "total",
                detail: format!("expected \"<currency> <price>\", got {line:?}"),
            })
        }
    };
    let price: f64 = price
        .parse()
        .map_err(|_| ExpenseError::MalformedNumeric {
            vendor: Vendor::Deliveroo,
            field: "price",
            token: price.to_string(),
        })?;

    Ok(ExtractedFields {
        currency: Some(currency.to_string()),
        price: Some(price),
        ..ExtractedFields::default()
    })
}
