#![deny(missing_docs)]

//! # Generate Command
//!
//! Maps an OpenAPI document to the provider IR and writes it as JSON.

use std::fs;
use std::path::PathBuf;

use tfcodegen_core::{load_document, map_document, Config};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, short = 'i', env = "TFCODEGEN_INPUT")]
    pub input: PathBuf,

    /// Path to the generator config.
    #[clap(long, short = 'c', default_value = "generator_config.yml")]
    pub config: PathBuf,

    /// Output file for the IR. Printed to stdout when omitted.
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Executes the generate command.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let json = render(args)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            info!(output = %path.display(), "wrote provider IR");
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Reads the inputs and renders the IR as pretty JSON.
fn render(args: &GenerateArgs) -> CliResult<String> {
    if !args.input.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            args.input
        )));
    }

    let content = fs::read_to_string(&args.input)?;
    let document = load_document(&content)?;
    let config = Config::load(&args.config)?;

    let ir = map_document(&document, &config);
    info!(
        resources = ir.resources.len(),
        data_sources = ir.data_sources.len(),
        "mapped provider IR"
    );

    Ok(serde_json::to_string_pretty(&ir)?)
}
