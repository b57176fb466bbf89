//! Error types for the assay library.

use std::path::PathBuf;
use thiserror::Error;

use crate::value::ColumnType;

/// Main error type for assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A precondition of the profiling run does not hold.
    #[error("validation error: {0}")]
    Validation(String),

    /// Catalog lookup miss for a data table identifier.
    #[error("data table id {0} not found in the catalog")]
    TableNotFound(i64),

    /// Source fetch for a column the table does not have.
    #[error("column '{0}' not found in the source table")]
    UnknownColumn(String),

    /// A caller tried to force a type the override path cannot produce.
    #[error("invalid override for column '{column}': forcing type '{requested}' is not allowed")]
    InvalidOverride {
        column: String,
        requested: ColumnType,
    },

    /// Error saving or loading a catalog or document file.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal contract violation; not a user-facing condition.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
