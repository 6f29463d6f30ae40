//! Schema document diff command

use super::{load_config, print_json, read_bytes, OutputFormat};
use apidrift_core::compute_diff;
use apidrift_core::diff::render_human_summary;
use apidrift_core::errors::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Previous schema document (JSON object)
    pub old: PathBuf,

    /// Current schema document (JSON object)
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: DiffArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let old = read_bytes(&args.old)?;
    let new = read_bytes(&args.new)?;

    let report = compute_diff(&old, &new, &config)?;

    match args.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Summary => print!("{}", render_human_summary(&report)),
    }
    Ok(())
}
