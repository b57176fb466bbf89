//! Core value and type-tag definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The semantic type assigned to a profiled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Every non-null value converts to a decimal number.
    Numeric,
    /// Free text; the fallback when nothing more specific applies.
    Text,
    /// Every non-null value converts to a calendar date.
    Date,
    /// Low-cardinality categorical values, summarized by frequency.
    Code,
}

impl ColumnType {
    /// Stable lowercase tag, as stored in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Code => "code",
        }
    }

    /// Returns true if a caller may force this type through an override.
    ///
    /// Only demotions to less specific types are legal; `numeric` and
    /// `date` require type-safe parsing the override path does not perform.
    pub fn is_valid_override(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Code)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell value as seen by the profiling engine.
///
/// Providers hand columns to the classifier as `Text`/`Null`; the
/// conversion probes re-materialize them as `Number`/`Date` when a whole
/// column converts.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing-value marker.
    Null,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// Build a raw value from one source cell, mapping null tokens to `Null`.
    pub fn from_raw(cell: &str) -> Self {
        if is_null_token(cell) {
            Value::Null
        } else {
            Value::Text(cell.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual rendering of the value; `None` for nulls.
    ///
    /// Integral numbers render without a trailing `.0` so a numeric column
    /// forced to text reads as `60614`, not `60614.0`. Dates render as ISO
    /// `YYYY-MM-DD`.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Number(n) => Some(format_number(*n)),
            Value::Date(d) => Some(d.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

/// Check whether a raw cell represents a missing value.
pub fn is_null_token(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_tokens() {
        assert!(is_null_token(""));
        assert!(is_null_token("  "));
        assert!(is_null_token("NA"));
        assert!(is_null_token("n/a"));
        assert!(is_null_token("NULL"));
        assert!(!is_null_token("0"));
        assert!(!is_null_token("nan-like but not"));
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(Value::from_raw(""), Value::Null);
        assert_eq!(Value::from_raw("abc"), Value::Text("abc".to_string()));
    }

    #[test]
    fn test_render_integral_number_without_fraction() {
        assert_eq!(Value::Number(60614.0).render().unwrap(), "60614");
        assert_eq!(Value::Number(-3.0).render().unwrap(), "-3");
        assert_eq!(Value::Number(2.5).render().unwrap(), "2.5");
    }

    #[test]
    fn test_render_date_is_iso() {
        let d = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(Value::Date(d).render().unwrap(), "2018-01-01");
    }

    #[test]
    fn test_render_null_is_none() {
        assert_eq!(Value::Null.render(), None);
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(ColumnType::Numeric.as_str(), "numeric");
        assert_eq!(ColumnType::Code.as_str(), "code");
        assert!(ColumnType::Text.is_valid_override());
        assert!(ColumnType::Code.is_valid_override());
        assert!(!ColumnType::Numeric.is_valid_override());
        assert!(!ColumnType::Date.is_valid_override());
    }
}
