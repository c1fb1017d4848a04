mod batch;
mod cli;
mod error;
mod fmt;
mod models;
mod parsers;
mod reader;
mod report;
mod settings;
mod vendor;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            dir,
            output,
            policy,
            no_export,
        } => cli::parse::run(&dir, output.as_deref(), policy.as_deref(), no_export),
        Commands::Classify { sender } => cli::classify::run(&sender),
        Commands::Vendors => cli::vendors::run(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set { key, value } => cli::config::set(&key, &value),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
