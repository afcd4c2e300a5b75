//! Quadrant Classification
//!
//! Splits a 2D plane at `(x_ref, y_ref)` for "high/low vs high/low" readings
//! of two indicators (e.g. nutrient index vs. food price inflation):
//!
//! ```text
//!         y
//!         ^
//!    Q2   |   Q1
//!         |
//! --------+--------> x
//!    Q3   |   Q4
//!         |
//! ```
//!
//! Points on a reference line fall on the `>=` side: Q1 if x ≥ x_ref and
//! y ≥ y_ref, Q2 if x < x_ref and y ≥ y_ref, Q3 if both are below, Q4
//! otherwise. Every comparison with NaN is false, so a missing coordinate or
//! a NaN reference always lands in Q4.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::utils::{median, numeric_values};

/// Default name of the label Series
pub const QUADRANT_COLUMN: &str = "quadrant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::Q1 => "Q1",
            Quadrant::Q2 => "Q2",
            Quadrant::Q3 => "Q3",
            Quadrant::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Q1" => Ok(Quadrant::Q1),
            "Q2" => Ok(Quadrant::Q2),
            "Q3" => Ok(Quadrant::Q3),
            "Q4" => Ok(Quadrant::Q4),
            other => Err(format!("unknown quadrant label '{}'", other)),
        }
    }
}

/// Classify a single point relative to `(x_ref, y_ref)`
pub fn classify_quadrant(x: f64, y: f64, x_ref: f64, y_ref: f64) -> Quadrant {
    if x >= x_ref && y >= y_ref {
        Quadrant::Q1
    } else if x < x_ref && y >= y_ref {
        Quadrant::Q2
    } else if x < x_ref && y < y_ref {
        Quadrant::Q3
    } else {
        Quadrant::Q4
    }
}

/// Median of a column's non-missing values; NaN when there are none
fn column_median(values: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    median(&present).unwrap_or(f64::NAN)
}

/// Quadrant of every row, aligned with the input
///
/// A reference left as `None` defaults to the median of its column over the
/// whole frame, computed once. A missing x or y is read as NaN, so the row
/// falls through to Q4; the same happens to every row when a defaulted median
/// has no values to come from.
///
/// # Errors
/// `MissingColumn` if either axis column is absent
pub fn classify_quadrants(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    x_ref: Option<f64>,
    y_ref: Option<f64>,
) -> Result<Vec<Quadrant>> {
    let xs = numeric_values(df, x_col)?;
    let ys = numeric_values(df, y_col)?;

    let x_ref = x_ref.unwrap_or_else(|| column_median(&xs));
    let y_ref = y_ref.unwrap_or_else(|| column_median(&ys));

    if x_ref.is_nan() || y_ref.is_nan() {
        tracing::warn!(
            "Quadrant reference for ({}, {}) is NaN; all rows classify as Q4",
            x_col, y_col
        );
    }

    tracing::debug!(
        "Quadrants for ({}, {}) split at ({}, {})",
        x_col, y_col, x_ref, y_ref
    );

    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| {
            classify_quadrant(
                x.unwrap_or(f64::NAN),
                y.unwrap_or(f64::NAN),
                x_ref,
                y_ref,
            )
        })
        .collect())
}

/// String Series named `quadrant` with `"Q1"`..`"Q4"` per row
///
/// See [`classify_quadrants`] for reference defaults and missing values.
pub fn quadrant_series(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    x_ref: Option<f64>,
    y_ref: Option<f64>,
) -> Result<Series> {
    let labels: Vec<&'static str> = classify_quadrants(df, x_col, y_col, x_ref, y_ref)?
        .into_iter()
        .map(Quadrant::as_str)
        .collect();

    Ok(Series::new(QUADRANT_COLUMN.into(), labels))
}
