//! # tsv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tsv_cli::build::{run_build, BuildArgs};
use tsv_cli::check::{run_check, CheckArgs};

/// tsv — declared types as runtime contracts.
///
/// Builds type tables from parsed interface, class and type-alias
/// declarations, and checks JSON/YAML documents against them.
#[derive(Parser, Debug)]
#[command(name = "tsv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a type table from a serialized syntax tree.
    Build(BuildArgs),

    /// Check documents against a named type of a type table.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tsv starting");

    let result = match cli.command {
        Commands::Build(args) => run_build(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(tsv_cli::EXIT_ERROR)
        }
    }
}
