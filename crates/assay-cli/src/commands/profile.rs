//! Profile command - register a table and extract its column metadata.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use colored::Colorize;

use assay::{
    DelimitedTable, MemoryCatalog, OverrideMap, Profiler, ProfilerConfig, TableDocument,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    name: String,
    catalog_path: PathBuf,
    threshold: usize,
    date_format: String,
    overrides: Option<PathBuf>,
    export: Option<PathBuf>,
    actor: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );

    // Load or start the catalog, and register the table.
    let mut catalog = if catalog_path.exists() {
        MemoryCatalog::load(&catalog_path)?
    } else {
        MemoryCatalog::new()
    };
    let table_id = catalog.register_table(&name);
    println!("Table id is {} for {}", table_id.to_string().white().bold(), name);

    // Build the profiler configuration.
    let mut config = ProfilerConfig {
        categorical_threshold: threshold,
        date_format,
        ..ProfilerConfig::default()
    };
    if let Some(path) = overrides {
        config.overrides = load_overrides(&path)?;
    }
    if let Some(actor) = actor {
        config.actor = actor;
    }

    // Run the profiler.
    let source = DelimitedTable::open(&file)?;
    let profiler = Profiler::with_config(config);
    let report = profiler.profile(&source, &mut catalog, table_id)?;

    println!(
        "Profiled {} rows across {} columns ({} bytes)",
        report.row_count.to_string().white().bold(),
        report.column_count.to_string().white().bold(),
        report.size_bytes
    );
    for column in &report.columns {
        println!(
            "  {:20} {}",
            column.name,
            column.data_type.to_string().yellow()
        );
    }

    catalog.save(&catalog_path)?;
    println!(
        "{} {}",
        "Catalog saved to".green().bold(),
        catalog_path.display().to_string().white()
    );

    // Optionally export the metadata document in the same run.
    if let Some(export_path) = export {
        let document = TableDocument::from_catalog(&catalog, table_id)?;
        document.save(&export_path)?;
        println!(
            "{} {}",
            "Document saved to".green().bold(),
            export_path.display().to_string().white()
        );
    }

    Ok(())
}

fn load_overrides(path: &PathBuf) -> Result<OverrideMap, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open overrides '{}': {}", path.display(), e))?;
    let overrides: OverrideMap = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse overrides '{}': {}", path.display(), e))?;
    Ok(overrides)
}
