#![deny(missing_docs)]

//! # Contract CLI
//!
//! Command Line Interface for the API contract generator.
//!
//! Supported Commands:
//! - `generate`: Endpoint table -> `api-contract.json` + `openapi.yaml`.
//! - `check-refs`: Reports `$ref` targets missing from the schema registry.

use clap::{Parser, Subcommand};
use contract_core::{AppError, AppResult};

mod builtin;
mod check;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API contract generator")]
struct Cli {
    /// Print debug logs.
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Only print errors.
    #[clap(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Writes the flat JSON contract and the OpenAPI document.
    Generate(generate::GenerateArgs),
    /// Fails when a schema reference has no target.
    CheckRefs(check::CheckRefsArgs),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::CheckRefs(args) => check::execute(args)?,
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> AppResult<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CONTRACT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::General(format!("Failed to initialize logging: {}", e)))
}
