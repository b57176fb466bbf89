//! Caller-supplied type overrides.
//!
//! Overrides let an operator correct an over-eager classification (a ZIP
//! column that parses as numeric but is semantically categorical or
//! textual) without re-reading the source. Only demotions are legal:
//! forcing `numeric` or `date` would need type-safe parsing the override
//! path does not perform.

use indexmap::IndexMap;

use crate::classify::Classification;
use crate::error::{AssayError, Result};
use crate::value::{ColumnType, Value};

/// Column name → forced type, in caller-supplied order.
pub type OverrideMap = IndexMap<String, ColumnType>;

/// Check every override target up front.
///
/// Called before any column is processed so an invalid override aborts
/// the run with nothing written.
pub fn validate_overrides(overrides: &OverrideMap) -> Result<()> {
    for (column, requested) in overrides {
        if !requested.is_valid_override() {
            return Err(AssayError::InvalidOverride {
                column: column.clone(),
                requested: *requested,
            });
        }
    }
    Ok(())
}

/// Apply the override for one column, if any.
///
/// - no override: the classifier result passes through unchanged;
/// - `text`: every value is re-rendered to its textual representation,
///   nulls round-tripping to nulls;
/// - `code`: the already-materialized values are reused unchanged;
/// - `numeric`/`date`: rejected, for any classifier result.
///
/// Forcing a column to its already-inferred `text` or `code` type is a
/// no-op.
pub fn apply_override(
    column: &str,
    classification: Classification,
    overrides: &OverrideMap,
) -> Result<Classification> {
    let Some(&requested) = overrides.get(column) else {
        return Ok(classification);
    };

    match requested {
        ColumnType::Numeric | ColumnType::Date => Err(AssayError::InvalidOverride {
            column: column.to_string(),
            requested,
        }),
        ColumnType::Text => {
            let values = classification
                .values
                .into_iter()
                .map(|v| match v.render() {
                    Some(rendered) => Value::Text(rendered),
                    None => Value::Null,
                })
                .collect();
            Ok(Classification::new(ColumnType::Text, values))
        }
        ColumnType::Code => Ok(Classification::new(
            ColumnType::Code,
            classification.values,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, ColumnType)]) -> OverrideMap {
        pairs
            .iter()
            .map(|(name, t)| (name.to_string(), *t))
            .collect()
    }

    #[test]
    fn test_no_override_passes_through() {
        let classification =
            Classification::new(ColumnType::Numeric, vec![Value::Number(1.0)]);
        let result = apply_override("zip", classification, &OverrideMap::new()).unwrap();

        assert_eq!(result.column_type, ColumnType::Numeric);
    }

    #[test]
    fn test_numeric_override_rejected() {
        let classification = Classification::new(ColumnType::Text, vec![]);
        let result = apply_override(
            "c",
            classification,
            &overrides(&[("c", ColumnType::Numeric)]),
        );

        assert!(matches!(
            result,
            Err(AssayError::InvalidOverride { requested: ColumnType::Numeric, .. })
        ));
    }

    #[test]
    fn test_date_override_rejected_even_for_date_column() {
        let classification = Classification::new(ColumnType::Date, vec![]);
        let result =
            apply_override("c", classification, &overrides(&[("c", ColumnType::Date)]));

        assert!(matches!(result, Err(AssayError::InvalidOverride { .. })));
    }

    #[test]
    fn test_text_override_renders_values_and_keeps_nulls() {
        let classification = Classification::new(
            ColumnType::Numeric,
            vec![Value::Number(60614.0), Value::Null],
        );
        let result = apply_override(
            "zip",
            classification,
            &overrides(&[("zip", ColumnType::Text)]),
        )
        .unwrap();

        assert_eq!(result.column_type, ColumnType::Text);
        assert_eq!(result.values[0], Value::Text("60614".to_string()));
        assert_eq!(result.values[1], Value::Null);
    }

    #[test]
    fn test_code_override_reuses_values() {
        let classification = Classification::new(
            ColumnType::Numeric,
            vec![Value::Number(1.0), Value::Number(1.0)],
        );
        let result = apply_override(
            "zip",
            classification,
            &overrides(&[("zip", ColumnType::Code)]),
        )
        .unwrap();

        assert_eq!(result.column_type, ColumnType::Code);
        assert_eq!(result.values, vec![Value::Number(1.0), Value::Number(1.0)]);
    }

    #[test]
    fn test_same_type_override_is_noop() {
        let classification = Classification::new(
            ColumnType::Code,
            vec![Value::Text("M".to_string())],
        );
        let result =
            apply_override("c", classification, &overrides(&[("c", ColumnType::Code)]))
                .unwrap();

        assert_eq!(result.column_type, ColumnType::Code);
        assert_eq!(result.values, vec![Value::Text("M".to_string())]);
    }

    #[test]
    fn test_validate_overrides() {
        assert!(validate_overrides(&overrides(&[
            ("a", ColumnType::Text),
            ("b", ColumnType::Code),
        ]))
        .is_ok());

        let result = validate_overrides(&overrides(&[
            ("a", ColumnType::Text),
            ("b", ColumnType::Date),
        ]));
        assert!(matches!(
            result,
            Err(AssayError::InvalidOverride { requested: ColumnType::Date, .. })
        ));
    }
}
