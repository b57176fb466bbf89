//! Metadata writer: one column-info row, then its detail rows.

use chrono::{DateTime, Utc};

use crate::catalog::{
    CatalogStore, CodeFrequencyEntry, ColumnId, DateDetail, NumericDetail, TableId, TextDetail,
};
use crate::error::{AssayError, Result};
use crate::stats::ColumnSummary;
use crate::value::ColumnType;

/// Persist one classified, summarized column.
///
/// Inserts the column row first, capturing the generated identifier, then
/// the matching detail: one numeric/text/date row, or one frequency row
/// per distinct code. Each insert is its own store call; there is no
/// batching and no rollback of earlier columns on failure.
///
/// A summary whose shape does not match `column_type` is a programming
/// error and fails before anything is written.
pub fn write_column_metadata(
    catalog: &mut dyn CatalogStore,
    table_id: TableId,
    column_name: &str,
    column_type: ColumnType,
    summary: &ColumnSummary,
    actor: &str,
    at: DateTime<Utc>,
) -> Result<ColumnId> {
    if summary.column_type() != column_type {
        return Err(AssayError::Internal(format!(
            "summary shape '{}' does not match column type '{}' for column '{}'",
            summary.column_type(),
            column_type,
            column_name
        )));
    }

    let column_id = catalog.insert_column(table_id, column_name, column_type, actor, at)?;

    match summary {
        ColumnSummary::Numeric(s) => {
            catalog.insert_numeric_detail(NumericDetail {
                column_id,
                table_id,
                column_name: column_name.to_string(),
                minimum: s.minimum,
                maximum: s.maximum,
                mean: s.mean,
                median: s.median,
                updated_by: actor.to_string(),
                updated_at: at,
            })?;
        }
        ColumnSummary::Text(s) => {
            catalog.insert_text_detail(TextDetail {
                column_id,
                table_id,
                column_name: column_name.to_string(),
                max_length: s.max_length,
                min_length: s.min_length,
                median_length: s.median_length,
                updated_by: actor.to_string(),
                updated_at: at,
            })?;
        }
        ColumnSummary::Date(s) => {
            catalog.insert_date_detail(DateDetail {
                column_id,
                table_id,
                column_name: column_name.to_string(),
                min_date: s.min_date,
                max_date: s.max_date,
                updated_by: actor.to_string(),
                updated_at: at,
            })?;
        }
        ColumnSummary::Code(frequencies) => {
            for (code, frequency) in frequencies {
                catalog.insert_code_frequency(CodeFrequencyEntry {
                    column_id,
                    table_id,
                    column_name: column_name.to_string(),
                    code: code.clone(),
                    frequency: *frequency,
                    updated_by: actor.to_string(),
                    updated_at: at,
                })?;
            }
        }
    }

    tracing::debug!(
        column = column_name,
        data_type = %column_type,
        column_id,
        "column metadata written"
    );

    Ok(column_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::stats::{code_frequencies, numeric_summary, summarize};
    use crate::value::Value;

    fn fixture() -> (MemoryCatalog, TableId) {
        let mut catalog = MemoryCatalog::new();
        let table_id = catalog.register_table("data.t");
        (catalog, table_id)
    }

    #[test]
    fn test_write_numeric_column() {
        let (mut catalog, table_id) = fixture();
        let values = vec![Value::Number(1.0), Value::Number(3.0), Value::Null];
        let summary = ColumnSummary::Numeric(numeric_summary(&values));

        let column_id = write_column_metadata(
            &mut catalog,
            table_id,
            "c_num",
            ColumnType::Numeric,
            &summary,
            "tester",
            Utc::now(),
        )
        .unwrap();

        let columns = catalog.columns_for_table(table_id);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].data_type, ColumnType::Numeric);

        let detail = catalog.numeric_detail(column_id).unwrap();
        assert_eq!(detail.minimum, Some(1.0));
        assert_eq!(detail.maximum, Some(3.0));
        assert_eq!(detail.column_name, "c_num");
        assert_eq!(detail.table_id, table_id);
    }

    #[test]
    fn test_write_code_column_one_row_per_code() {
        let (mut catalog, table_id) = fixture();
        let values = vec![
            Value::Text("M".to_string()),
            Value::Text("F".to_string()),
            Value::Text("F".to_string()),
            Value::Null,
        ];
        let summary = ColumnSummary::Code(code_frequencies(&values));

        let column_id = write_column_metadata(
            &mut catalog,
            table_id,
            "c_code",
            ColumnType::Code,
            &summary,
            "tester",
            Utc::now(),
        )
        .unwrap();

        let rows = catalog.code_frequencies_for_column(column_id);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.frequency).sum::<u64>(), 4);
        assert!(rows.iter().any(|r| r.code.is_none() && r.frequency == 1));
    }

    #[test]
    fn test_mismatched_summary_writes_nothing() {
        let (mut catalog, table_id) = fixture();
        let summary = summarize(ColumnType::Text, &[]);

        let result = write_column_metadata(
            &mut catalog,
            table_id,
            "c",
            ColumnType::Numeric,
            &summary,
            "tester",
            Utc::now(),
        );

        assert!(matches!(result, Err(AssayError::Internal(_))));
        assert!(catalog.columns_for_table(table_id).is_empty());
    }
}
