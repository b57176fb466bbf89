//! Export command - serialize one profiled table's metadata.

use std::path::PathBuf;

use colored::Colorize;

use assay::{MemoryCatalog, TableDocument};

pub fn run(
    catalog_path: PathBuf,
    table_id: i64,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !catalog_path.exists() {
        return Err(format!("Catalog not found: {}", catalog_path.display()).into());
    }

    let catalog = MemoryCatalog::load(&catalog_path)?;
    let document = TableDocument::from_catalog(&catalog, table_id)?;

    match output {
        Some(path) => {
            document.save(&path)?;
            println!(
                "{} {}",
                "Document saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
