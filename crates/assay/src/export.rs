//! Portable JSON document built from one table's catalog rows.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, ColumnId, TableId};
use crate::error::{AssayError, Result};
use crate::value::ColumnType;

/// Exported metadata for one profiled table.
///
/// Built entirely from persisted catalog rows, so a document can be
/// produced long after the profiling run, or by a different process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    pub table: TableSection,
    pub columns: Vec<ColumnSection>,
}

/// Table-level fields of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSection {
    pub table_id: TableId,
    pub name: String,
    pub row_count: Option<u64>,
    pub column_count: Option<u64>,
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiled_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiled_at: Option<DateTime<Utc>>,
}

/// Column-level fields; exactly one of the type-specific sections is
/// populated, matching the column's classified type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSection {
    pub column_id: ColumnId,
    pub name: String,
    pub data_type: ColumnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<CodeCount>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSection {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSection {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub median_length: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSection {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// One distinct categorical value; a `null` code is the missing-value
/// marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeCount {
    pub code: Option<String>,
    pub frequency: u64,
}

impl TableDocument {
    /// Assemble the document for one table from its catalog rows.
    pub fn from_catalog(catalog: &dyn CatalogStore, table_id: TableId) -> Result<Self> {
        let entry = catalog.table_entry(table_id)?;

        let table = TableSection {
            table_id: entry.table_id,
            name: entry.qualified_name,
            row_count: entry.row_count,
            column_count: entry.column_count,
            size_bytes: entry.size_bytes,
            profiled_by: entry.updated_by,
            profiled_at: entry.updated_at,
        };

        let mut columns = Vec::new();
        for column in catalog.columns_for_table(table_id) {
            let mut section = ColumnSection {
                column_id: column.column_id,
                name: column.column_name,
                data_type: column.data_type,
                numeric: None,
                text: None,
                date: None,
                codes: None,
            };

            match column.data_type {
                ColumnType::Numeric => {
                    section.numeric =
                        catalog
                            .numeric_detail(column.column_id)
                            .map(|d| NumericSection {
                                minimum: d.minimum,
                                maximum: d.maximum,
                                mean: d.mean,
                                median: d.median,
                            });
                }
                ColumnType::Text => {
                    section.text = catalog.text_detail(column.column_id).map(|d| TextSection {
                        min_length: d.min_length,
                        max_length: d.max_length,
                        median_length: d.median_length,
                    });
                }
                ColumnType::Date => {
                    section.date = catalog.date_detail(column.column_id).map(|d| DateSection {
                        min_date: d.min_date,
                        max_date: d.max_date,
                    });
                }
                ColumnType::Code => {
                    section.codes = Some(
                        catalog
                            .code_frequencies_for_column(column.column_id)
                            .into_iter()
                            .map(|e| CodeCount {
                                code: e.code,
                                frequency: e.frequency,
                            })
                            .collect(),
                    );
                }
            }

            columns.push(section);
        }

        Ok(TableDocument { table, columns })
    }

    /// Save the document to a pretty-printed JSON file.
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
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            AssayError::Persistence(format!("failed to serialize document: {}", e))
        })?;

        Ok(())
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            AssayError::Persistence(format!("failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        let document = serde_json::from_reader(reader).map_err(|e| {
            AssayError::Persistence(format!(
                "failed to parse document '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::stats::{code_frequencies, summarize};
    use crate::value::Value;
    use crate::writer::write_column_metadata;
    use chrono::Utc;

    fn profiled_catalog() -> (MemoryCatalog, TableId) {
        let mut catalog = MemoryCatalog::new();
        let table_id = catalog.register_table("data.people");
        let now = Utc::now();

        let ages = vec![Value::Number(25.0), Value::Number(31.0)];
        write_column_metadata(
            &mut catalog,
            table_id,
            "age",
            ColumnType::Numeric,
            &summarize(ColumnType::Numeric, &ages),
            "tester",
            now,
        )
        .unwrap();

        let sexes = vec![
            Value::Text("M".to_string()),
            Value::Text("F".to_string()),
        ];
        write_column_metadata(
            &mut catalog,
            table_id,
            "sex",
            ColumnType::Code,
            &crate::stats::ColumnSummary::Code(code_frequencies(&sexes)),
            "tester",
            now,
        )
        .unwrap();

        (catalog, table_id)
    }

    #[test]
    fn test_document_has_one_section_per_column() {
        let (catalog, table_id) = profiled_catalog();
        let document = TableDocument::from_catalog(&catalog, table_id).unwrap();

        assert_eq!(document.table.name, "data.people");
        assert_eq!(document.columns.len(), 2);

        let age = &document.columns[0];
        assert!(age.numeric.is_some());
        assert!(age.text.is_none() && age.date.is_none() && age.codes.is_none());

        let sex = &document.columns[1];
        assert!(sex.codes.is_some());
        assert_eq!(sex.codes.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_document_unknown_table() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            TableDocument::from_catalog(&catalog, 9),
            Err(AssayError::TableNotFound(9))
        ));
    }

    #[test]
    fn test_save_load_round_trip() {
        let (catalog, table_id) = profiled_catalog();
        let document = TableDocument::from_catalog(&catalog, table_id).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.metadata.json");
        document.save(&path).unwrap();

        let loaded = TableDocument::load(&path).unwrap();
        assert_eq!(loaded.table.table_id, table_id);
        assert_eq!(loaded.columns.len(), 2);
    }
}
