//! Error type shared by the indicator, quadrant and database helpers.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the analysis helpers
///
/// Every variant surfaces immediately to the caller: nothing is retried and
/// no partial result is returned.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// A column has no non-missing values to compute a statistic from
    #[error("no non-missing data in column '{column}'")]
    MissingData { column: String },

    /// A requested column is not present in the DataFrame
    #[error("column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Precomputed bounds were supplied without an entry for a column
    #[error("no percentile bounds for column '{column}'")]
    MissingBounds { column: String },

    #[error("invalid percentile pair ({lower}, {upper}): expected 0 <= lower <= upper <= 100")]
    InvalidPercentile { lower: f64, upper: f64 },

    /// The embedded database could not open the requested target
    #[cfg(feature = "duckdb")]
    #[error("failed to open DuckDB database '{target}'")]
    ConnectionOpen {
        target: String,
        #[source]
        source: duckdb::Error,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, IndicatorError>;
