#![deny(missing_docs)]

//! # tfcodegen CLI
//!
//! Command Line Interface for lowering OpenAPI documents into provider IR.
//!
//! Supported Commands:
//! - `generate`: OpenAPI document + generator config -> IR JSON.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod telemetry;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to provider IR generator")]
struct Cli {
    /// Log debug output (overridden by `RUST_LOG`).
    #[clap(long, short = 'v', global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Map an OpenAPI document to resource and data source IR.
    Generate(generate::GenerateArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}
