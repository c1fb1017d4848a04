use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::batch::FailurePolicy;
use crate::error::{ExpenseError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "default_na_marker")]
    pub na_marker: String,
    #[serde(default = "default_report_name")]
    pub report_name: String,
}

fn default_na_marker() -> String {
    "NA".to_string()
}

fn default_report_name() -> String {
    "Email_Expenses.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            na_marker: default_na_marker(),
            report_name: default_report_name(),
        }
    }
}

pub const KEYS: &[&str] = &["failure_policy", "na_marker", "report_name"];

impl Settings {
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "failure_policy" => self.failure_policy = value.parse()?,
            "na_marker" => self.na_marker = value.to_string(),
            "report_name" => {
                if value.trim().is_empty() {
                    return Err(ExpenseError::Settings("report_name cannot be empty".into()));
                }
                self.report_name = value.trim().to_string();
            }
            other => {
                return Err(ExpenseError::Settings(format!(
                    "unknown key {other} (expected one of {})",
                    KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("email-expenses")
}

pub fn settings_path() -> PathBuf {
    // Tests and scripted runs point this elsewhere.
    match std::env::var_os("EMAIL_EXPENSES_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => config_dir().join("settings.json"),
    }
}

pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ExpenseError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("settings.json");
        let settings = Settings {
            failure_policy: FailurePolicy::SkipAndReport,
            na_marker: "-".to_string(),
            report_name: "march.csv".to_string(),
        };
        save_settings_to(&settings, &path).unwrap();
        assert_eq!(load_settings_from(&path), settings);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"skip-and-report\""));
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("missing.json"));
        assert_eq!(s.failure_policy, FailurePolicy::FailFast);
        assert_eq!(s.na_marker, "NA");
        assert_eq!(s.report_name, "Email_Expenses.csv");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"na_marker": "n/a"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.na_marker, "n/a");
        assert_eq!(s.failure_policy, FailurePolicy::FailFast);
        assert_eq!(s.report_name, "Email_Expenses.csv");
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), Settings::default());
    }

    #[test]
    fn test_set_keys() {
        let mut s = Settings::default();
        s.set("failure_policy", "skip-and-report").unwrap();
        s.set("na_marker", "").unwrap();
        s.set("report_name", " out.csv ").unwrap();
        assert_eq!(s.failure_policy, FailurePolicy::SkipAndReport);
        assert_eq!(s.na_marker, "");
        assert_eq!(s.report_name, "out.csv");

        assert!(s.set("failure_policy", "sometimes").is_err());
        assert!(s.set("report_name", "  ").is_err());
        assert!(s.set("colour", "blue").is_err());
    }
}
