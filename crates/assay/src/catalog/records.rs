//! Catalog row records.
//!
//! One struct per catalog table. Detail and frequency rows denormalize the
//! table identifier and column name alongside the column identifier, and
//! every row carries the updated-by/updated-at audit pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::ColumnType;

pub type TableId = i64;
pub type ColumnId = i64;

/// One profiled table; registered before profiling, statistics filled in
/// by the profiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub table_id: TableId,
    /// Fully-qualified `schema.table` name.
    pub qualified_name: String,
    pub row_count: Option<u64>,
    pub column_count: Option<u64>,
    pub size_bytes: Option<u64>,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TableEntry {
    pub fn new(table_id: TableId, qualified_name: impl Into<String>) -> Self {
        Self {
            table_id,
            qualified_name: qualified_name.into(),
            row_count: None,
            column_count: None,
            size_bytes: None,
            updated_by: None,
            updated_at: None,
        }
    }
}

/// Table-level statistics persisted by one profiling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub row_count: u64,
    pub column_count: u64,
    pub size_bytes: u64,
}

/// One profiled column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub column_id: ColumnId,
    pub table_id: TableId,
    pub column_name: String,
    pub data_type: ColumnType,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Numeric statistics for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericDetail {
    pub column_id: ColumnId,
    pub table_id: TableId,
    pub column_name: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Text-length statistics for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextDetail {
    pub column_id: ColumnId,
    pub table_id: TableId,
    pub column_name: String,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub median_length: Option<f64>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Date-range statistics for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateDetail {
    pub column_id: ColumnId,
    pub table_id: TableId,
    pub column_name: String,
    pub min_date: Option<chrono::NaiveDate>,
    pub max_date: Option<chrono::NaiveDate>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// One distinct value of a categorical column and its occurrence count.
/// A `None` code is the null marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeFrequencyEntry {
    pub column_id: ColumnId,
    pub table_id: TableId,
    pub column_name: String,
    pub code: Option<String>,
    pub frequency: u64,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}
