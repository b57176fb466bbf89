//! Per-type summary statistics.
//!
//! All four calculators take a value sequence that may contain null
//! markers. Numeric, text, and date statistics exclude nulls and return
//! all-`None` summaries when no non-null values remain; the frequency
//! calculator is null-aware and gives the null marker its own count.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::{ColumnType, Value};

/// Summary of a numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Summary of a text column, over per-value character lengths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSummary {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub median_length: Option<f64>,
}

/// Summary of a date column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateSummary {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Occurrence count per distinct rendered value; a `None` key is the
/// null marker. Insertion order is first-appearance order.
pub type CodeFrequencies = IndexMap<Option<String>, u64>;

/// A computed summary, tagged by the shape it carries.
#[derive(Debug, Clone)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Text(TextSummary),
    Date(DateSummary),
    Code(CodeFrequencies),
}

impl ColumnSummary {
    /// The column type this summary shape belongs to.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnSummary::Numeric(_) => ColumnType::Numeric,
            ColumnSummary::Text(_) => ColumnType::Text,
            ColumnSummary::Date(_) => ColumnType::Date,
            ColumnSummary::Code(_) => ColumnType::Code,
        }
    }
}

/// Dispatch to the calculator matching the classified type.
pub fn summarize(column_type: ColumnType, values: &[Value]) -> ColumnSummary {
    match column_type {
        ColumnType::Numeric => ColumnSummary::Numeric(numeric_summary(values)),
        ColumnType::Text => ColumnSummary::Text(text_summary(values)),
        ColumnType::Date => ColumnSummary::Date(date_summary(values)),
        ColumnType::Code => ColumnSummary::Code(code_frequencies(values)),
    }
}

/// Minimum, maximum, mean, and median over non-null numbers.
pub fn numeric_summary(values: &[Value]) -> NumericSummary {
    let mut numbers: Vec<f64> = values
        .iter()
        .filter_map(|v| match v {
            Value::Number(n) => Some(*n),
            _ => None,
        })
        .collect();

    if numbers.is_empty() {
        return NumericSummary::default();
    }

    numbers.sort_by(f64::total_cmp);
    let sum: f64 = numbers.iter().sum();

    NumericSummary {
        minimum: Some(numbers[0]),
        maximum: Some(numbers[numbers.len() - 1]),
        mean: Some(sum / numbers.len() as f64),
        median: Some(median_of_sorted(&numbers)),
    }
}

/// Minimum, maximum, and median character length over non-null text.
pub fn text_summary(values: &[Value]) -> TextSummary {
    let mut lengths: Vec<u64> = values
        .iter()
        .filter_map(|v| match v {
            Value::Text(s) => Some(s.chars().count() as u64),
            _ => None,
        })
        .collect();

    if lengths.is_empty() {
        return TextSummary::default();
    }

    lengths.sort_unstable();
    let as_f64: Vec<f64> = lengths.iter().map(|&l| l as f64).collect();

    TextSummary {
        min_length: Some(lengths[0]),
        max_length: Some(lengths[lengths.len() - 1]),
        median_length: Some(median_of_sorted(&as_f64)),
    }
}

/// Minimum and maximum over non-null dates.
///
/// A null-only column yields `None` fields, mirroring the numeric and
/// text calculators, rather than failing.
pub fn date_summary(values: &[Value]) -> DateSummary {
    let dates: Vec<NaiveDate> = values
        .iter()
        .filter_map(|v| match v {
            Value::Date(d) => Some(*d),
            _ => None,
        })
        .collect();

    DateSummary {
        min_date: dates.iter().min().copied(),
        max_date: dates.iter().max().copied(),
    }
}

/// Occurrence count of every distinct value, nulls included.
///
/// The sum of all counts equals the input length, so for a full column it
/// equals the table's row count.
pub fn code_frequencies(values: &[Value]) -> CodeFrequencies {
    let mut frequencies = CodeFrequencies::new();
    for value in values {
        *frequencies.entry(value.render()).or_insert(0) += 1;
    }
    frequencies
}

/// Sort-based median: the middle element, or the average of the two
/// middle elements for even counts. Input must be sorted and non-empty.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
