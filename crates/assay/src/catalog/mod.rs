//! Catalog store contract and implementations.

mod memory;
mod records;

pub use memory::MemoryCatalog;
pub use records::{
    CodeFrequencyEntry, ColumnEntry, ColumnId, DateDetail, NumericDetail, TableEntry, TableId,
    TableStats, TextDetail,
};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::value::ColumnType;

/// The catalog the profiler writes into and the export surface reads from.
///
/// The handle is threaded explicitly through the profiler and writer, so
/// test doubles and isolated runs need no shared state. All writes are
/// append-only except `update_table_stats`, which mutates the one
/// registered table row.
pub trait CatalogStore {
    /// Look up a registered table by identifier.
    fn table_entry(&self, table_id: TableId) -> Result<TableEntry>;

    /// Record table-level statistics for one profiling run.
    fn update_table_stats(
        &mut self,
        table_id: TableId,
        stats: TableStats,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// Insert a column row and return its generated identifier.
    fn insert_column(
        &mut self,
        table_id: TableId,
        column_name: &str,
        data_type: ColumnType,
        actor: &str,
        at: DateTime<Utc>,
    ) -> Result<ColumnId>;

    fn insert_numeric_detail(&mut self, detail: NumericDetail) -> Result<()>;

    fn insert_text_detail(&mut self, detail: TextDetail) -> Result<()>;

    fn insert_date_detail(&mut self, detail: DateDetail) -> Result<()>;

    /// Insert one frequency row; called once per distinct code.
    fn insert_code_frequency(&mut self, entry: CodeFrequencyEntry) -> Result<()>;

    /// All column rows for a table, in insertion order.
    fn columns_for_table(&self, table_id: TableId) -> Vec<ColumnEntry>;

    fn numeric_detail(&self, column_id: ColumnId) -> Option<NumericDetail>;

    fn text_detail(&self, column_id: ColumnId) -> Option<TextDetail>;

    fn date_detail(&self, column_id: ColumnId) -> Option<DateDetail>;

    /// All frequency rows for a column, in insertion order.
    fn code_frequencies_for_column(&self, column_id: ColumnId) -> Vec<CodeFrequencyEntry>;
}
