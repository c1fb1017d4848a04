use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, Result};
use crate::models::{ExpenseRecord, ExpenseTable, ExtractedFields, Message};
use crate::parsers::extract;
use crate::vendor::{classify_purpose, classify_sender, Vendor};

/// What to do when a known vendor's receipt cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failure.
    #[default]
    FailFast,
    /// Leave the message out of the table and report it.
    SkipAndReport,
}

impl FailurePolicy {
    pub fn key(&self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::SkipAndReport => "skip-and-report",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FailurePolicy {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "fail-fast" => Ok(Self::FailFast),
            "skip-and-report" => Ok(Self::SkipAndReport),
            other => Err(ExpenseError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub source: String,
    pub vendor: Vendor,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub table: ExpenseTable,
    /// Messages from unknown senders.
    pub skipped: usize,
    /// Known-vendor messages that failed under `SkipAndReport`.
    pub failures: Vec<ParseFailure>,
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn build_record(message: &Message, vendor: Vendor, fields: ExtractedFields) -> ExpenseRecord {
    ExpenseRecord {
        // Weekday from the vendor-local date, stored date in UTC.
        weekday: message.date.map(|d| weekday_name(d.weekday())),
        date: message.date.map(|d| d.naive_utc()),
        vendor,
        subject: message.subject.clone(),
        fields,
        purpose: classify_purpose(vendor),
    }
}

fn parse_one(message: &Message) -> (Vendor, Result<ExtractedFields>) {
    let vendor = classify_sender(&message.sender);
    tracing::debug!(source = %message.source, %vendor, "classified sender");
    let fields = extract(vendor, &message.body).map_err(|e| e.in_message(&message.source, vendor));
    (vendor, fields)
}

/// Classify and parse every message, in input order.
///
/// Rows with no extracted field at all (unknown senders included) are left
/// out of the table. Under `FailFast` the first parse failure is returned as
/// the error; under `SkipAndReport` it is listed in `failures` instead.
pub fn parse_messages(messages: &[Message], policy: FailurePolicy) -> Result<BatchReport> {
    let report = messages
        .iter()
        .try_fold(BatchReport::default(), |mut acc, message| {
            let (vendor, fields) = parse_one(message);
            match fields {
                Ok(fields) => {
                    if fields.skipped {
                        acc.skipped += 1;
                    }
                    if !fields.is_empty() {
                        acc.table.push(build_record(message, vendor, fields));
                    }
                }
                Err(e) if policy == FailurePolicy::SkipAndReport => {
                    tracing::warn!(source = %message.source, error = %e, "message left out");
                    acc.failures.push(ParseFailure {
                        source: message.source.clone(),
                        vendor,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
            Ok(acc)
        })?;

    tracing::info!(
        messages = messages.len(),
        rows = report.table.len(),
        skipped = report.skipped,
        failed = report.failures.len(),
        "batch parsed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    fn message(source: &str, sender: &str, date: &str, body: &str) -> Message {
        Message {
            source: source.to_string(),
            sender: sender.to_string(),
            subject: format!("Receipt {source}"),
            date: Some(DateTime::parse_from_rfc3339(date).unwrap()),
            body: body.to_string(),
        }
    }

    fn deliveroo(source: &str, amount: &str) -> Message {
        message(
            source,
            "Deliveroo <support@deliveroo.ae>",
            "2019-03-04T21:15:00+04:00",
            &format!("Your order\r\n\r\nTotal\r\nAED {amount}\r\n"),
        )
    }

    fn bcd() -> Message {
        message(
            "flight.eml",
            "mmc@bcdtravel.ae",
            "2019-03-10T02:30:00+04:00",
            "Flight\tVendor\tStatus\r\n\
             EK 003\tDXB-LHR\tConfirmed\r\n\
             Electronic Ticket Number\r\n\
             1762345678901\tEmirates\r\n\
             Total Amount\t1,234.56 USD\r\n\
             Airline Record Locator: ABC123\r\n",
        )
    }

    fn unknown() -> Message {
        message(
            "news.eml",
            "random@other.com",
            "2019-03-05T10:00:00+00:00",
            "Total\nAED 1.00",
        )
    }

    #[test]
    fn test_mixed_batch() {
        let messages = vec![deliveroo("a.eml", "123.45"), unknown(), bcd()];
        let report = parse_messages(&messages, FailurePolicy::FailFast).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.table.len(), 2);
        assert!(report.failures.is_empty());

        let first = &report.table[0];
        assert_eq!(first.vendor, Vendor::Deliveroo);
        assert_eq!(first.fields.price, Some(123.45));
        assert_eq!(first.purpose, Some("* Meals Self"));

        let second = &report.table[1];
        assert_eq!(second.vendor, Vendor::Bcd);
        assert_eq!(second.fields.price, Some(1234.56));
        assert_eq!(
            second.fields.ticket_reference.as_deref(),
            Some("1762345678901 - ABC123")
        );
        assert_eq!(second.purpose, Some("* Airfare"));
    }

    #[test]
    fn test_empty_batch() {
        let report = parse_messages(&[], FailurePolicy::FailFast).unwrap();
        assert!(report.table.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_row_order_follows_input() {
        let messages = vec![
            deliveroo("3.eml", "30.00"),
            deliveroo("1.eml", "10.00"),
            deliveroo("2.eml", "20.00"),
        ];
        let report = parse_messages(&messages, FailurePolicy::FailFast).unwrap();
        let prices: Vec<_> = report.table.iter().map(|r| r.fields.price).collect();
        assert_eq!(prices, vec![Some(30.0), Some(10.0), Some(20.0)]);
    }

    #[test]
    fn test_parsing_twice_is_identical() {
        let messages = vec![deliveroo("a.eml", "5.50"), unknown(), bcd()];
        let first = parse_messages(&messages, FailurePolicy::FailFast).unwrap();
        let second = parse_messages(&messages, FailurePolicy::FailFast).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_date_is_utc_and_weekday_is_local() {
        // 02:30 on Sunday in Dubai is still Saturday in UTC.
        let report = parse_messages(&[bcd()], FailurePolicy::FailFast).unwrap();
        let record = &report.table[0];
        assert_eq!(record.weekday, Some("Sunday"));
        assert_eq!(
            record.date,
            NaiveDate::from_ymd_opt(2019, 3, 9).and_then(|d| d.and_hms_opt(22, 30, 0))
        );
    }

    #[test]
    fn test_fail_fast_aborts_with_message_identity() {
        let broken = deliveroo("broken.eml", "");
        let messages = vec![deliveroo("a.eml", "1.00"), broken];
        let err = parse_messages(&messages, FailurePolicy::FailFast).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("broken.eml"), "{text}");
        assert!(text.contains("Deliveroo"), "{text}");
    }

    #[test]
    fn test_skip_and_report_continues() {
        let mut broken = deliveroo("broken.eml", "1.00");
        broken.body = "no receipt here".to_string();
        let messages = vec![broken, unknown(), deliveroo("ok.eml", "7.25")];
        let report = parse_messages(&messages, FailurePolicy::SkipAndReport).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, "broken.eml");
        assert_eq!(report.failures[0].vendor, Vendor::Deliveroo);
        assert!(report.failures[0].reason.contains("total"));
    }

    #[test]
    fn test_missing_date_leaves_date_and_weekday_empty() {
        let mut m = deliveroo("a.eml", "2.00");
        m.date = None;
        let report = parse_messages(&[m], FailurePolicy::FailFast).unwrap();
        assert!(report.table[0].date.is_none());
        assert!(report.table[0].weekday.is_none());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("fail-fast".parse::<FailurePolicy>().unwrap(), FailurePolicy::FailFast);
        assert_eq!(
            "Skip_And_Report".parse::<FailurePolicy>().unwrap(),
            FailurePolicy::SkipAndReport
        );
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
