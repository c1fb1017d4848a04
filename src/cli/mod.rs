pub mod classify;
pub mod config;
pub mod parse;
pub mod vendors;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "email-expenses",
    version,
    about = "Extract expense records from vendor receipt emails."
)]
pub struct Cli {
    /// Log each message as it is classified
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse every .eml message in a directory and write the expense report.
    Parse {
        /// Directory containing .eml files
        dir: String,
        /// Report path (default: <dir>/<report_name>)
        #[arg(long)]
        output: Option<String>,
        /// What to do with unparseable receipts: fail-fast, skip-and-report
        #[arg(long)]
        policy: Option<String>,
        /// Print the table without writing a report file
        #[arg(long = "no-export")]
        no_export: bool,
    },
    /// Show which vendor a sender address belongs to.
    Classify {
        /// Sender display name and/or address
        sender: String,
    },
    /// List the vendors whose receipts can be parsed.
    Vendors,
    /// Show or change saved settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Set a value: failure_policy, na_marker, report_name.
    Set { key: String, value: String },
}
