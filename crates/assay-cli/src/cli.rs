//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: profile tabular data into a metadata catalog
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register and profile a delimited data file into a catalog
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fully-qualified table name as schema.table
        #[arg(short, long)]
        name: String,

        /// Catalog file, created if missing
        #[arg(short, long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Max number of distinct values in a categorical column
        #[arg(short = 't', long, default_value = "10")]
        threshold: usize,

        /// chrono format string used by the date probe
        #[arg(long, default_value = "%Y-%m-%d")]
        date_format: String,

        /// JSON file mapping column names to forced types (text or code)
        #[arg(short, long)]
        overrides: Option<PathBuf>,

        /// Also write the exported metadata document to this path
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Actor recorded in audit fields (default: current user)
        #[arg(long)]
        actor: Option<String>,
    },

    /// Export one profiled table's metadata as a JSON document
    Export {
        /// Catalog file to read
        #[arg(short, long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Data table identifier in the catalog
        #[arg(long)]
        table_id: i64,

        /// Output path (default: print to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
