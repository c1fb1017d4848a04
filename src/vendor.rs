use std::fmt;

// ---------------------------------------------------------------------------
// Vendor identities, classified from the sender alone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Deliveroo,
    UberTravel,
    Bcd,
    Unknown,
}

impl Vendor {
    /// Display name used in the report's Sender column.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deliveroo => "Deliveroo",
            Self::UberTravel => "Uber Travel",
            Self::Bcd => "BCD",
            Self::Unknown => "Unknown",
        }
    }

    /// Lowercase token looked for inside the sender string.
    pub fn signature(&self) -> Option<&'static str> {
        match self {
            Self::Deliveroo => Some("deliveroo"),
            Self::UberTravel => Some("uber receipts"),
            Self::Bcd => Some("bcdtravel"),
            Self::Unknown => None,
        }
    }

    /// Bookkeeping category for expenses from this vendor.
    pub fn purpose(&self) -> Option<&'static str> {
        match self {
            Self::Bcd => Some("* Airfare"),
            Self::Deliveroo => Some("* Meals Self"),
            Self::UberTravel => Some("Taxi"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Known vendors in match priority order.
pub const KNOWN_VENDORS: &[Vendor] = &[Vendor::Deliveroo, Vendor::UberTravel, Vendor::Bcd];

pub fn classify_sender(sender: &str) -> Vendor {
    let sender = sender.to_lowercase();
    KNOWN_VENDORS
        .iter()
        .find(|v| v.signature().is_some_and(|sig| sender.contains(sig)))
        .copied()
        .unwrap_or(Vendor::Unknown)
}

pub fn classify_purpose(vendor: Vendor) -> Option<&'static str> {
    vendor.purpose()
}
