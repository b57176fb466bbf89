//! Source data provider contract.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classify::{try_dates, try_numeric};
use crate::error::Result;
use crate::value::Value;

/// A tabular data source the profiler can read.
///
/// Implementations return a named column's full contents as raw values
/// (`Text` and `Null`). The conversion operations fail distinguishably
/// from a successful empty fetch: `Ok(None)` means the column does not
/// convert, `Ok(Some(vec![]))` is a converted zero-row column.
pub trait TableSource {
    /// Column names in source-defined order.
    fn column_names(&self) -> &[String];

    /// Full contents of a named column as raw values.
    fn column_values(&self, column: &str) -> Result<Vec<Value>>;

    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Storage size of the table in bytes.
    fn size_bytes(&self) -> u64;

    /// Fetch a column converted to numbers, or `Ok(None)` if any non-null
    /// value fails to convert. A SQL-backed source may override this with
    /// a server-side cast.
    fn numeric_column(&self, column: &str) -> Result<Option<Vec<Value>>> {
        Ok(try_numeric(&self.column_values(column)?))
    }

    /// Fetch a column converted to dates with the given chrono format, or
    /// `Ok(None)` if any non-null value fails to convert.
    fn date_column(&self, column: &str, format: &str) -> Result<Option<Vec<Value>>> {
        Ok(try_dates(&self.column_values(column)?, format))
    }
}

/// Metadata about a file-backed source table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}
