//! Export the OpenAPI document as JSON or YAML.

use std::fs;
use std::io;
use std::path::PathBuf;

use backend::doc::ApiDoc;
use clap::{Parser, ValueEnum};
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Export the OpenAPI document for external tooling",
    version
)]
struct CliArgs {
    /// Serialisation format for the document.
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
    /// Write to this path instead of standard output.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let document = match args.format {
        Format::Json => ApiDoc::openapi()
            .to_pretty_json()
            .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?,
        Format::Yaml => ApiDoc::openapi()
            .to_yaml()
            .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?,
    };

    match args.output {
        Some(path) => fs::write(path, document)?,
        None => println!("{document}"),
    }

    Ok(())
}
