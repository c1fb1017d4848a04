use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::vendor::Vendor;

/// A decoded message as handed over by the reader.
#[derive(Debug, Clone)]
pub struct Message {
    /// File name or caller label, used to identify the message in errors.
    pub source: String,
    pub sender: String,
    pub subject: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub body: String,
}

/// Fields pulled out of a message body. Anything a vendor's parser does not
/// produce stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub currency: Option<String>,
    pub price: Option<f64>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub ticket_reference: Option<String>,
    /// Set only for unknown senders; no scan was attempted.
    pub skipped: bool,
}

impl ExtractedFields {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.currency.is_none()
            && self.price.is_none()
            && self.departure.is_none()
            && self.arrival.is_none()
            && self.ticket_reference.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Converted to UTC and stored without an offset.
    pub date: Option<NaiveDateTime>,
    pub weekday: Option<&'static str>,
    pub vendor: Vendor,
    pub subject: String,
    pub fields: ExtractedFields,
    pub purpose: Option<&'static str>,
}

pub const COLUMNS: [&str; 10] = [
    "Date",
    "Weekday",
    "Sender",
    "Subject",
    "FX",
    "Price",
    "From",
    "To",
    "TicketNumber",
    "Purpose",
];

impl ExpenseRecord {
    /// Cells in `COLUMNS` order, with missing values replaced by `na`.
    pub fn cells(&self, na: &str) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| na.to_string());
        vec![
            self.date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| na.to_string()),
            self.weekday.unwrap_or(na).to_string(),
            self.vendor.name().to_string(),
            self.subject.clone(),
            text(&self.fields.currency),
            self.fields
                .price
                .map(|p| p.to_string())
                .unwrap_or_else(|| na.to_string()),
            text(&self.fields.departure),
            text(&self.fields.arrival),
            text(&self.fields.ticket_reference),
            self.purpose.unwrap_or(na).to_string(),
        ]
    }
}

/// Rows in input message order.
pub type ExpenseTable = Vec<ExpenseRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_fields_are_empty() {
        let f = ExtractedFields::skipped();
        assert!(f.skipped);
        assert!(f.is_empty());
    }

    #[test]
    fn test_cells_fill_missing_with_marker() {
        let record = ExpenseRecord {
            date: None,
            weekday: None,
            vendor: Vendor::Deliveroo,
            subject: "Your order".to_string(),
            fields: ExtractedFields {
                currency: Some("AED".to_string()),
                price: Some(42.5),
                ..ExtractedFields::default()
            },
            purpose: Some("* Meals Self"),
        };
        let cells = record.cells("NA");
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "NA");
        assert_eq!(cells[2], "Deliveroo");
        assert_eq!(cells[4], "AED");
        assert_eq!(cells[5], "42.5");
        assert_eq!(cells[6], "NA");
        assert_eq!(cells[9], "* Meals Self");
    }
}
