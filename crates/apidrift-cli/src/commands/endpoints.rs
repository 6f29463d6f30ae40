//! Endpoint snapshot comparison command

use super::{load_config, print_json, read_json, OutputFormat};
use apidrift_core::diff::render_endpoint_summary;
use apidrift_core::errors::Result;
use apidrift_core::{compare_endpoints, EndpointSchema};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Previous snapshot: JSON array of `{path, method, schema}`
    pub old: PathBuf,

    /// Current snapshot
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: EndpointsArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let old: Vec<EndpointSchema> = read_json(&args.old)?;
    let new: Vec<EndpointSchema> = read_json(&args.new)?;

    let changes = compare_endpoints(&old, &new, &config)?;

    match args.format {
        OutputFormat::Json => print_json(&changes)?,
        OutputFormat::Summary => print!("{}", render_endpoint_summary(&changes)),
    }
    Ok(())
}
