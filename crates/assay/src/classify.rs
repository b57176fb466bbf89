//! Column type inference.
//!
//! The classifier runs a fixed-priority cascade over a column: numeric,
//! then date, then categorical ("code"), then text. The numeric and date
//! probes are all-or-nothing conversions expressed as try-parse functions
//! returning `Option` — a failed conversion is the expected signal that
//! moves the cascade to the next level, never an error. Numeric and date
//! run first so that a low-cardinality numeric or date column is still
//! reported with its more specific statistics instead of being collapsed
//! into a frequency table.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::source::TableSource;
use crate::value::{ColumnType, Value};

/// Date format used by the date probe unless the caller supplies one.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default maximum distinct values for a categorical column.
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 10;

/// A classified column: the inferred type plus the materialized values.
#[derive(Debug, Clone)]
pub struct Classification {
    pub column_type: ColumnType,
    pub values: Vec<Value>,
}

impl Classification {
    pub fn new(column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            column_type,
            values,
        }
    }
}

/// Try to convert a whole column to numbers.
///
/// Returns the converted values when every non-null value parses as a
/// finite decimal number (nulls pass through), and `None` otherwise. An
/// all-null column converts vacuously.
pub fn try_numeric(raw: &[Value]) -> Option<Vec<Value>> {
    raw.iter()
        .map(|value| match value {
            Value::Null => Some(Value::Null),
            Value::Number(n) => Some(Value::Number(*n)),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number),
            Value::Date(_) => None,
        })
        .collect()
}

/// Try to convert a whole column to calendar dates with the given
/// chrono format string. Same all-or-nothing semantics as [`try_numeric`].
pub fn try_dates(raw: &[Value], format: &str) -> Option<Vec<Value>> {
    raw.iter()
        .map(|value| match value {
            Value::Null => Some(Value::Null),
            Value::Date(d) => Some(Value::Date(*d)),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), format)
                .ok()
                .map(Value::Date),
            Value::Number(_) => None,
        })
        .collect()
}

/// Count distinct non-null values, comparing by textual rendering.
///
/// Nulls are not counted toward the cardinality check, matching
/// `COUNT(DISTINCT ...)` semantics; the frequency calculator still gives
/// the null marker its own row when it occurs.
pub fn distinct_count(raw: &[Value]) -> usize {
    let mut seen: HashSet<String> = HashSet::new();
    for value in raw {
        if let Some(rendered) = value.render() {
            seen.insert(rendered);
        }
    }
    seen.len()
}

/// Infers column types by probing a [`TableSource`].
#[derive(Debug, Clone)]
pub struct Classifier {
    categorical_threshold: usize,
    date_format: String,
}

impl Classifier {
    pub fn new(categorical_threshold: usize) -> Self {
        Self {
            categorical_threshold,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn categorical_threshold(&self) -> usize {
        self.categorical_threshold
    }

    /// Classify one named column of the source.
    ///
    /// The cascade is deterministic: the same column contents and the same
    /// threshold always produce the same classification.
    pub fn classify_column(
        &self,
        source: &dyn TableSource,
        column: &str,
    ) -> Result<Classification> {
        if let Some(values) = source.numeric_column(column)? {
            return Ok(Classification::new(ColumnType::Numeric, values));
        }

        if let Some(values) = source.date_column(column, &self.date_format)? {
            return Ok(Classification::new(ColumnType::Date, values));
        }

        // The raw materialization fetched for the cardinality check doubles
        // as the text fallback, so there is no separate fetch.
        let raw = source.column_values(column)?;
        if distinct_count(&raw) <= self.categorical_threshold {
            Ok(Classification::new(ColumnType::Code, raw))
        } else {
            Ok(Classification::new(ColumnType::Text, raw))
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORICAL_THRESHOLD)
    }
}
