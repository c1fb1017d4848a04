use crate::error::Result;
use crate::vendor::{classify_purpose, classify_sender, Vendor};

pub fn run(sender: &str) -> Result<()> {
    let vendor = classify_sender(sender);
    if vendor == Vendor::Unknown {
        println!("Unknown (messages from this sender are skipped)");
        return Ok(());
    }
    println!("Vendor:   {vendor}");
    println!("Purpose:  {}", classify_purpose(vendor).unwrap_or_default());
    Ok(())
}
