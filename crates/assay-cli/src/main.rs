//! Assay CLI - profile tabular data into a metadata catalog.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "assay=debug" } else { "assay=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Profile {
            file,
            name,
            catalog,
            threshold,
            date_format,
            overrides,
            export,
            actor,
        } => commands::profile::run(
            file,
            name,
            catalog,
            threshold,
            date_format,
            overrides,
            export,
            actor,
        ),

        Commands::Export {
            catalog,
            table_id,
            output,
        } => commands::export::run(catalog, table_id, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
