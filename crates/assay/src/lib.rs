//! Assay: column profiling and catalog metadata for tabular datasets.
//!
//! Assay reads a table from a data source, infers each column's semantic
//! type through a fixed-priority cascade (numeric → date → code → text),
//! computes type-specific summary statistics, and records everything as
//! rows in a catalog store. A profiled table can then be exported as a
//! portable JSON document.
//!
//! # Example
//!
//! ```no_run
//! use assay::{DelimitedTable, MemoryCatalog, Profiler, TableDocument};
//!
//! # fn main() -> assay::Result<()> {
//! let source = DelimitedTable::open("people.csv")?;
//!
//! let mut catalog = MemoryCatalog::new();
//! let table_id = catalog.register_table("data.people");
//!
//! let report = Profiler::new().profile(&source, &mut catalog, table_id)?;
//! println!("profiled {} columns", report.columns.len());
//!
//! let document = TableDocument::from_catalog(&catalog, table_id)?;
//! document.save("people.metadata.json")?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod classify;
pub mod error;
pub mod export;
pub mod overrides;
pub mod profile;
pub mod source;
pub mod stats;
pub mod value;

mod writer;

pub use catalog::{CatalogStore, ColumnId, MemoryCatalog, TableEntry, TableId, TableStats};
pub use classify::{Classification, Classifier, DEFAULT_CATEGORICAL_THRESHOLD, DEFAULT_DATE_FORMAT};
pub use error::{AssayError, Result};
pub use export::TableDocument;
pub use overrides::OverrideMap;
pub use profile::{ColumnReport, ProfileReport, Profiler, ProfilerConfig};
pub use source::{DelimitedTable, SourceMetadata, TableSource};
pub use stats::ColumnSummary;
pub use value::{ColumnType, Value};
pub use writer::write_column_metadata;
