//! apidrift CLI
//!
//! Command-line interface for comparing scraped API schemas

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apidrift")]
#[command(about = "apidrift - Detect structural drift between API schema snapshots", long_about = None)]
struct Cli {
    /// Emit operation logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two schema documents
    Diff(commands::diff::DiffArgs),
    /// Compare two endpoint snapshots
    Endpoints(commands::endpoints::EndpointsArgs),
    /// Build the alert payload for two schema documents or snapshots
    Alert(commands::alert::AlertArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        apidrift_core::logging_facility::init(apidrift_core::logging_facility::Profile::Development);
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Endpoints(args) => commands::endpoints::execute(args),
        Commands::Alert(args) => commands::alert::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
