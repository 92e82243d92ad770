//! relswap CLI
//!
//! Command-line interface for relswap

use clap::{Parser, Subcommand, ValueEnum};
use relswap_core::logging_facility::{init, Profile};
use relswap_core_types::RunId;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "relswap")]
#[command(about = "relswap - upgrade/downgrade descriptors between application builds", long_about = None)]
struct Cli {
    /// Log output on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute and write the descriptor between two builds
    Generate(commands::generate::GenerateArgs),
    /// Show a build directory's version and units
    Inspect(commands::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });
    let run_id = RunId::new();
    let span = tracing::info_span!("relswap", run_id = %run_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
