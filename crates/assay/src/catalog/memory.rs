//! In-memory catalog store with JSON file persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};
use crate::value::ColumnType;

use super::records::{
    CodeFrequencyEntry, ColumnEntry, ColumnId, DateDetail, NumericDetail, TableEntry, TableId,
    TableStats, TextDetail,
};
use super::CatalogStore;

/// An in-memory catalog backed by plain row vectors.
///
/// Rows are append-only, like the tables they model; re-profiling a table
/// appends a second generation of column rows under the same table id.
/// The whole catalog serializes to a single JSON file via [`save`] and
/// [`load`].
///
/// [`save`]: MemoryCatalog::save
/// [`load`]: MemoryCatalog::load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    next_table_id: TableId,
    next_column_id: ColumnId,
    tables: Vec<TableEntry>,
    columns: Vec<ColumnEntry>,
    numeric_details: Vec<NumericDetail>,
    text_details: Vec<TextDetail>,
    date_details: Vec<DateDetail>,
    code_frequencies: Vec<CodeFrequencyEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table to be profiled, returning its new identifier.
    pub fn register_table(&mut self, qualified_name: &str) -> TableId {
        self.next_table_id += 1;
        let table_id = self.next_table_id;
        self.tables.push(TableEntry::new(table_id, qualified_name));
        table_id
    }

    /// All registered tables, in registration order.
    pub fn tables(&self) -> &[TableEntry] {
        &self.tables
    }

    /// Save the catalog to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AssayError::Persistence(format!(
                        "failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            AssayError::Persistence(format!("failed to create file '{}': {}", path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| AssayError::Persistence(format!("failed to serialize catalog: {}", e)))?;

        Ok(())
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            AssayError::Persistence(format!("failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let catalog = serde_json::from_reader(reader).map_err(|e| {
            AssayError::Persistence(format!(
                "failed to parse catalog '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(catalog)
    }
}

impl CatalogStore for MemoryCatalog {
    fn table_entry(&self, table_id: TableId) -> Result<TableEntry> {
        self.tables
            .iter()
            .find(|t| t.table_id == table_id)
            .cloned()
            .ok_or(AssayError::TableNotFound(table_id))
    }

    fn update_table_stats(
        &mut self,
        table_id: TableId,
        stats: TableStats,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let entry = self
            .tables
            .iter_mut()
            .find(|t| t.table_id == table_id)
            .ok_or(AssayError::TableNotFound(table_id))?;

        entry.row_count = Some(stats.row_count);
        entry.column_count = Some(stats.column_count);
        entry.size_bytes = Some(stats.size_bytes);
        entry.updated_by = Some(actor.to_string());
        entry.updated_at = Some(at);

        Ok(())
    }

    fn insert_column(
        &mut self,
        table_id: TableId,
        column_name: &str,
        data_type: ColumnType,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<ColumnId> {
        self.next_column_id += 1;
        let column_id = self.next_column_id;

        self.columns.push(ColumnEntry {
            column_id,
            table_id,
            column_name: column_name.to_string(),
            data_type,
            updated_by: actor.to_string(),
            updated_at: at,
        });

        Ok(column_id)
    }

    fn insert_numeric_detail(&mut self, detail: NumericDetail) -> Result<()> {
        self.numeric_details.push(detail);
        Ok(())
    }

    fn insert_text_detail(&mut self, detail: TextDetail) -> Result<()> {
        self.text_details.push(detail);
        Ok(())
    }

    fn insert_date_detail(&mut self, detail: DateDetail) -> Result<()> {
        self.date_details.push(detail);
        Ok(())
    }

    fn insert_code_frequency(&mut self, entry: CodeFrequencyEntry) -> Result<()> {
        self.code_frequencies.push(entry);
        Ok(())
    }

    fn columns_for_table(&self, table_id: TableId) -> Vec<ColumnEntry> {
        self.columns
            .iter()
            .filter(|c| c.table_id == table_id)
            .cloned()
            .collect()
    }

    fn numeric_detail(&self, column_id: ColumnId) -> Option<NumericDetail> {
        self.numeric_details
            .iter()
            .find(|d| d.column_id == column_id)
            .cloned()
    }

    fn text_detail(&self, column_id: ColumnId) -> Option<TextDetail> {
        self.text_details
            .iter()
            .find(|d| d.column_id == column_id)
            .cloned()
    }

    fn date_detail(&self, column_id: ColumnId) -> Option<DateDetail> {
        self.date_details
            .iter()
            .find(|d| d.column_id == column_id)
            .cloned()
    }

    fn code_frequencies_for_column(&self, column_id: ColumnId) -> Vec<CodeFrequencyEntry> {
        self.code_frequencies
            .iter()
            .filter(|e| e.column_id == column_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_table_allocates_sequential_ids() {
        let mut catalog = MemoryCatalog::new();
        assert_eq!(catalog.register_table("data.first"), 1);
        assert_eq!(catalog.register_table("data.second"), 2);
    }

    #[test]
    fn test_table_entry_not_found() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            catalog.table_entry(42),
            Err(AssayError::TableNotFound(42))
        ));
    }

    #[test]
    fn test_update_table_stats() {
        let mut catalog = MemoryCatalog::new();
        let table_id = catalog.register_table("data.t");
        let stats = TableStats {
            row_count: 4,
            column_count: 2,
            size_bytes: 128,
        };

        catalog
            .update_table_stats(table_id, stats, "tester", Utc::now())
            .unwrap();

        let entry = catalog.table_entry(table_id).unwrap();
        assert_eq!(entry.row_count, Some(4));
        assert_eq!(entry.column_count, Some(2));
        assert_eq!(entry.size_bytes, Some(128));
        assert_eq!(entry.updated_by.as_deref(), Some("tester"));
    }

    #[test]
    fn test_insert_column_allocates_ids() {
        let mut catalog = MemoryCatalog::new();
        let table_id = catalog.register_table("data.t");
        let now = Utc::now();

        let first = catalog
            .insert_column(table_id, "a", ColumnType::Numeric, "tester", now)
            .unwrap();
        let second = catalog
            .insert_column(table_id, "b", ColumnType::Text, "tester", now)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(catalog.columns_for_table(table_id).len(), 2);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut catalog = MemoryCatalog::new();
        let table_id = catalog.register_table("data.t");
        catalog
            .insert_column(table_id, "a", ColumnType::Code, "tester", Utc::now())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        catalog.save(&path).unwrap();

        let mut loaded = MemoryCatalog::load(&path).unwrap();
        assert_eq!(loaded.tables().len(), 1);
        assert_eq!(loaded.columns_for_table(table_id).len(), 1);
        // Id allocation continues where the saved catalog left off.
        assert_eq!(loaded.register_table("data.u"), 2);
    }
}
