pub mod bcd;
pub mod deliveroo;
pub mod rules;
pub mod uber;

use crate::error::Result;
use crate::models::ExtractedFields;
use crate::vendor::Vendor;

impl Vendor {
    /// Run this vendor's body parser.
    pub fn parse_body(&self, body: &str) -> Result<ExtractedFields> {
        match self {
            Self::Deliveroo => deliveroo::parse(body),
            Self::UberTravel => uber::parse(body),
            Self::Bcd => bcd::parse(body),
            Self::Unknown => Ok(ExtractedFields::skipped()),
        }
    }
}

/// Route a body to its vendor's parser. Unknown senders are never scanned
/// and come back as skipped; parser failures are passed through untouched.
pub fn extract(vendor: Vendor, body: &str) -> Result<ExtractedFields> {
    vendor.parse_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;

    #[test]
    fn test_unknown_vendor_is_skipped_without_scanning() {
        let fields = extract(Vendor::Unknown, "Total\nAED 10.00").unwrap();
        assert!(fields.skipped);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_dispatch_to_vendor_parser() {
        let fields = extract(Vendor::Deliveroo, "Total\nAED 123.45").unwrap();
        assert_eq!(fields.currency.as_deref(), Some("AED"));
        assert_eq!(fields.price, Some(123.45));
        assert!(!fields.skipped);
    }

    #[test]
    fn test_parser_failure_propagates() {
        let err = extract(Vendor::Bcd, "Total Amount 10.00 AED").unwrap_err();
        assert!(matches!(err, ExpenseError::AnchorNotFound { vendor: Vendor::Bcd, .. }));
    }
}
