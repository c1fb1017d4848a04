use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:        {}", settings_path().display());
    println!("failure_policy:  {}", settings.failure_policy);
    println!("na_marker:       {:?}", settings.na_marker);
    println!("report_name:     {}", settings.report_name);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.set(key, value)?;
    save_settings(&settings)?;
    println!("Set {key}");
    Ok(())
}
