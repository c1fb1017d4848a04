use thiserror::Error;

use crate::vendor::Vendor;

#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("missing expected field {anchor} in {vendor} receipt")]
    AnchorNotFound { vendor: Vendor, anchor: &'static str },

    #[error("malformed {field} in {vendor} receipt: {token:?}")]
    MalformedNumeric {
        vendor: Vendor,
        field: &'static str,
        token: String,
    },

    #[error("unexpected {field} layout in {vendor} receipt: {detail}")]
    MalformedLayout {
        vendor: Vendor,
        field: &'static str,
        detail: String,
    },

    #[error("could not parse message {source_name} from vendor {vendor}: {error}")]
    Message {
        source_name: String,
        vendor: Vendor,
        #[source]
        error: Box<ExpenseError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read message {0}")]
    Mail(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Unknown failure policy: {0} (expected fail-fast or skip-and-report)")]
    UnknownPolicy(String),
}

impl ExpenseError {
    /// Attach the identity of the message that failed to parse.
    pub fn in_message(self, source_name: &str, vendor: Vendor) -> Self {
        ExpenseError::Message {
            source_name: source_name.to_string(),
            vendor,
            error: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
