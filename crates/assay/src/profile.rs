//! Table profiler: the end-to-end orchestration of one profiling run.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, TableId, TableStats};
use crate::classify::{Classifier, DEFAULT_CATEGORICAL_THRESHOLD, DEFAULT_DATE_FORMAT};
use crate::error::{AssayError, Result};
use crate::overrides::{apply_override, validate_overrides, OverrideMap};
use crate::source::TableSource;
use crate::stats::summarize;
use crate::value::ColumnType;
use crate::writer::write_column_metadata;

// Exactly one schema qualifier and one table name, no embedded whitespace.
static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s.]+\.[^\s.]+$").unwrap());

/// Configuration for a profiling run.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Maximum distinct non-null values for a categorical column.
    pub categorical_threshold: usize,
    /// chrono format string used by the date probe.
    pub date_format: String,
    /// Forced type per column name (`text`/`code` only).
    pub overrides: OverrideMap,
    /// Actor recorded in the audit fields of every written row.
    pub actor: String,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            overrides: OverrideMap::new(),
            actor: default_actor(),
        }
    }
}

/// One profiled column, as reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReport {
    pub column_id: i64,
    pub name: String,
    pub data_type: ColumnType,
}

/// Result of one profiling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub table_id: TableId,
    pub qualified_name: String,
    pub row_count: u64,
    pub column_count: u64,
    pub size_bytes: u64,
    pub columns: Vec<ColumnReport>,
}

/// Profiles one source table into a catalog store.
///
/// A run is linear and synchronous: resolve the table's identity, persist
/// table-level statistics, then classify, summarize, and write each column
/// in source order. Columns are committed one at a time; a failure mid-run
/// leaves the columns already written in place. Two simultaneous runs
/// against the same table are not coordinated.
pub struct Profiler {
    config: ProfilerConfig,
    classifier: Classifier,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        let classifier = Classifier::new(config.categorical_threshold)
            .with_date_format(config.date_format.clone());
        Self { config, classifier }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Run one profiling pass over `source`, writing into `catalog` under
    /// the previously registered `table_id`.
    ///
    /// Fails fast, with nothing written, when the table id is unknown, the
    /// registered name is not `schema.table`, an override forces
    /// `numeric`/`date`, or the source has zero rows.
    pub fn profile(
        &self,
        source: &dyn TableSource,
        catalog: &mut dyn CatalogStore,
        table_id: TableId,
    ) -> Result<ProfileReport> {
        let entry = catalog.table_entry(table_id)?;
        let (schema_name, table_name) = split_qualified_name(&entry.qualified_name)?;

        validate_overrides(&self.config.overrides)?;

        let row_count = source.row_count();
        if row_count == 0 {
            return Err(AssayError::Validation(format!(
                "table '{}' has 0 rows",
                entry.qualified_name
            )));
        }

        let stats = TableStats {
            row_count: row_count as u64,
            column_count: source.column_names().len() as u64,
            size_bytes: source.size_bytes(),
        };
        let now = Utc::now();
        catalog.update_table_stats(table_id, stats, &self.config.actor, now)?;

        tracing::info!(
            schema = %schema_name,
            table = %table_name,
            rows = stats.row_count,
            columns = stats.column_count,
            "profiling table"
        );

        let mut columns = Vec::new();
        for name in source.column_names().to_vec() {
            let classification = self.classifier.classify_column(source, &name)?;
            let classification =
                apply_override(&name, classification, &self.config.overrides)?;
            let summary = summarize(classification.column_type, &classification.values);

            let column_id = write_column_metadata(
                catalog,
                table_id,
                &name,
                classification.column_type,
                &summary,
                &self.config.actor,
                now,
            )?;

            columns.push(ColumnReport {
                column_id,
                name,
                data_type: classification.column_type,
            });
        }

        Ok(ProfileReport {
            table_id,
            qualified_name: entry.qualified_name,
            row_count: stats.row_count,
            column_count: stats.column_count,
            size_bytes: stats.size_bytes,
            columns,
        })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a fully-qualified name into schema and table, rejecting anything
/// that is not exactly `schema.table`.
fn split_qualified_name(qualified: &str) -> Result<(String, String)> {
    if !QUALIFIED_NAME.is_match(qualified) {
        return Err(AssayError::Validation(format!(
            "table name '{}' is not in <schema>.<table> format",
            qualified
        )));
    }

    let (schema, table) = qualified
        .split_once('.')
        .expect("pattern guarantees one dot");
    Ok((schema.to_string(), table.to_string()))
}

fn default_actor() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualified_name() {
        let (schema, table) = split_qualified_name("data.events").unwrap();
        assert_eq!(schema, "data");
        assert_eq!(table, "events");
    }

    #[test]
    fn test_split_rejects_unqualified_name() {
        assert!(matches!(
            split_qualified_name("events"),
            Err(AssayError::Validation(_))
        ));
    }

    #[test]
    fn test_split_rejects_extra_dots() {
        assert!(matches!(
            split_qualified_name("a.b.c"),
            Err(AssayError::Validation(_))
        ));
    }

    #[test]
    fn test_split_rejects_empty_parts() {
        assert!(split_qualified_name(".table").is_err());
        assert!(split_qualified_name("schema.").is_err());
        assert!(split_qualified_name(".").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ProfilerConfig::default();
        assert_eq!(config.categorical_threshold, 10);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert!(config.overrides.is_empty());
        assert!(!config.actor.is_empty());
    }
}
