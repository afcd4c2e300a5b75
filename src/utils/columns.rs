//! Column access helpers with validation
//!
//! Every lookup goes through [`require_column`] so a missing column is
//! reported as [`IndicatorError::MissingColumn`] together with the columns
//! that are available, instead of a bare Polars "not found" error.

use polars::prelude::*;

use crate::error::{IndicatorError, Result};

/// Look up a column, failing with `MissingColumn` when absent
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    if df.get_column_index(name).is_none() {
        return Err(IndicatorError::MissingColumn {
            column: name.to_string(),
            available: df
                .get_column_names()
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
        });
    }

    Ok(df.column(name)?)
}

/// Read a numeric column as `f64` values, row-aligned
///
/// Nulls and NaN are both reported as `None`. Integer and float dtypes are
/// cast to `Float64` first; the cast is strict, so text that does not parse
/// as a number fails with a Polars error instead of turning into nulls.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?.strict_cast(&DataType::Float64)?;

    Ok(column
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect())
}

/// Non-missing values of a numeric column, in row order
pub fn present_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(numeric_values(df, name)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_column_missing() {
        let df = df![
            "code" => &["a", "b"],
        ]
        .unwrap();

        let err = require_column(&df, "energy_100g").unwrap_err();
        match err {
            IndicatorError::MissingColumn { column, available } => {
                assert_eq!(column, "energy_100g");
                assert_eq!(available, vec!["code".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_numeric_values_treats_nan_and_null_as_missing() {
        let df = df![
            "x" => &[Some(1.0), None, Some(f64::NAN), Some(4.0)],
        ]
        .unwrap();

        let values = numeric_values(&df, "x").unwrap();
        assert_eq!(values, vec![Some(1.0), None, None, Some(4.0)]);
        assert_eq!(present_values(&df, "x").unwrap(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_numeric_values_rejects_unparsable_text() {
        let df = df![
            "sugars_100g" => &["12.5", "n/a"],
        ]
        .unwrap();

        let err = numeric_values(&df, "sugars_100g").unwrap_err();
        assert!(matches!(err, IndicatorError::Polars(_)));
    }

    #[test]
    fn test_numeric_values_casts_integers() {
        let df = df![
            "n" => &[1i64, 2, 3],
        ]
        .unwrap();

        assert_eq!(
            numeric_values(&df, "n").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }
}
