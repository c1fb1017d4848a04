use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::vendor::KNOWN_VENDORS;

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Vendor", "Sender contains", "Purpose"]);
    for vendor in KNOWN_VENDORS {
        table.add_row(vec![
            Cell::new(vendor.name()),
            Cell::new(vendor.signature().unwrap_or_default()),
            Cell::new(vendor.purpose().unwrap_or_default()),
        ]);
    }
    println!("Supported vendors\n{table}");
    Ok(())
}
