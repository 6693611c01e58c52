//! auditrail CLI
//!
//! Command-line interface for setpoints and their change log

use auditrail_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "auditrail")]
#[command(about = "auditrail - Setpoint management with a field-level change log", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(
        long,
        global = true,
        env = "AUDITRAIL_DB",
        default_value = ".auditrail/store.db"
    )]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Feature operations
    Feature(commands::feature::FeatureArgs),
    /// Threshold set operations
    ThresholdSet(commands::threshold_set::ThresholdSetArgs),
    /// Change log queries
    Changelog(commands::changelog::ChangelogArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(Profile::from_app_env(
        std::env::var("APP_ENV").ok().as_deref(),
    ));

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let conn = auditrail_store::db::open_and_migrate(&cli.db)?;

    let result = match cli.command {
        Commands::Feature(args) => commands::feature::execute(args, &conn),
        Commands::ThresholdSet(args) => commands::threshold_set::execute(args, &conn),
        Commands::Changelog(args) => commands::changelog::execute(args, &conn),
    };

    let counters = auditrail_engine::capture_counters();
    tracing::debug!(
        change_sets = counters.change_sets(),
        records = counters.records(),
        resolve_failures = counters.resolve_failures(),
        persist_failures = counters.persist_failures(),
        "Capture summary"
    );

    result
}
