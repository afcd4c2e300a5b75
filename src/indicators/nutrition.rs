//! OpenFoodFacts Nutrient Density Index
//!
//! Blends several per-100g nutrient measurements into one synthetic score:
//!
//! 1. Fit: compute the lower/upper percentile of each nutrient column
//!    ([`compute_percentile_bounds`]).
//! 2. Apply: scale every nutrient into `[0, 1]` with those bounds, clipping
//!    outliers, then average the scaled columns and multiply by 100
//!    ([`apply_nutrient_index`]).
//!
//! Keeping the two steps apart lets bounds learned on a reference cohort
//! (e.g. one year of products) be reused unchanged on later data, so scores
//! stay comparable across periods. [`fit_nutrient_index`] runs both steps on
//! the same frame for exploratory use.

use anyhow::Context;
use polars::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{IndicatorError, Result};
use crate::utils::{numeric_values, percentile_sorted, present_values, require_column};
use crate::utils::stats::sorted_copy;

/// OpenFoodFacts nutrient columns used by default
pub const NUTRIENT_COLUMNS_DEFAULT: [&str; 4] = [
    "energy_100g",
    "sugars_100g",
    "saturated-fat_100g",
    "sodium_100g",
];

/// Default `(raw column, normalized column)` names
pub const NORMALIZED_COLUMN_NAMES_DEFAULT: [(&str, &str); 4] = [
    ("energy_100g", "s_energy"),
    ("sugars_100g", "s_sugars"),
    ("saturated-fat_100g", "s_satfat"),
    ("sodium_100g", "s_sodium"),
];

pub const DEFAULT_LOWER_PCT: f64 = 5.0;
pub const DEFAULT_UPPER_PCT: f64 = 95.0;
pub const DEFAULT_INDEX_COLUMN: &str = "off_nutrient_index";

/// Added to the upper bound when both percentiles coincide
pub const DEGENERATE_BOUNDS_EPSILON: f64 = 1e-9;

/// Which columns feed the index and how the outputs are named
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NutrientIndexConfig {
    /// Raw nutrient columns, in output order
    pub columns: Vec<String>,
    /// Raw column → normalized column name; unmapped columns get `s_<column>`
    pub normalized_names: BTreeMap<String, String>,
    pub lower_pct: f64,
    pub upper_pct: f64,
    /// Name of the synthetic index column
    pub index_column: String,
}

impl Default for NutrientIndexConfig {
    fn default() -> Self {
        Self {
            columns: NUTRIENT_COLUMNS_DEFAULT.iter().map(|c| c.to_string()).collect(),
            normalized_names: NORMALIZED_COLUMN_NAMES_DEFAULT
                .iter()
                .map(|(raw, norm)| (raw.to_string(), norm.to_string()))
                .collect(),
            lower_pct: DEFAULT_LOWER_PCT,
            upper_pct: DEFAULT_UPPER_PCT,
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
        }
    }
}

impl NutrientIndexConfig {
    /// Config over arbitrary columns, named `s_<column>`, default percentiles
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            normalized_names: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Load config from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read nutrient index config: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| "Failed to parse nutrient index config JSON")
    }

    /// Name of the normalized column produced for `column`
    pub fn normalized_column_name(&self, column: &str) -> String {
        self.normalized_names
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("s_{}", column))
    }
}

/// Per-column `(lower, upper)` percentile bounds
///
/// Serializes as `{"column": [lower, upper], ...}`. Entries keep the order in
/// which they were inserted, i.e. the order columns were requested in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentileBounds {
    entries: Vec<(String, (f64, f64))>,
}

impl PercentileBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the bounds for `column`
    pub fn insert(&mut self, column: impl Into<String>, bounds: (f64, f64)) {
        let column = column.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = bounds,
            None => self.entries.push((column, bounds)),
        }
    }

    pub fn get(&self, column: &str) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, bounds)| *bounds)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, (f64, f64))> {
        self.entries.iter().map(|(name, bounds)| (name.as_str(), *bounds))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the bounds as pretty JSON
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize percentile bounds")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write percentile bounds: {:?}", path))
    }

    /// Read bounds previously written by [`PercentileBounds::save_json`]
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read percentile bounds: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| "Failed to parse percentile bounds JSON")
    }
}

impl Serialize for PercentileBounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for PercentileBounds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BoundsVisitor;

        impl<'de> Visitor<'de> for BoundsVisitor {
            type Value = PercentileBounds;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column name to [lower, upper]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut bounds = PercentileBounds::new();
                while let Some((column, pair)) = map.next_entry::<String, (f64, f64)>()? {
                    bounds.insert(column, pair);
                }
                Ok(bounds)
            }
        }

        deserializer.deserialize_map(BoundsVisitor)
    }
}

/// Compute the `lower_pct`/`upper_pct` percentiles of each column
///
/// Missing values (null or NaN) are dropped first. Percentiles interpolate
/// linearly between closest ranks. When both percentiles are equal the upper
/// bound is nudged by [`DEGENERATE_BOUNDS_EPSILON`] so that normalization
/// never divides by zero.
///
/// # Errors
/// - `InvalidPercentile` unless `0 <= lower_pct <= upper_pct <= 100`
/// - `MissingColumn` if a column is absent
/// - `MissingData` if a column has no non-missing values
pub fn compute_percentile_bounds<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    lower_pct: f64,
    upper_pct: f64,
) -> Result<PercentileBounds> {
    let valid = |p: f64| (0.0..=100.0).contains(&p);
    if !valid(lower_pct) || !valid(upper_pct) || lower_pct > upper_pct {
        return Err(IndicatorError::InvalidPercentile {
            lower: lower_pct,
            upper: upper_pct,
        });
    }

    let mut bounds = PercentileBounds::new();

    for column in columns {
        let column = column.as_ref();
        let sorted = sorted_copy(&present_values(df, column)?);

        let (Some(p_low), Some(mut p_high)) = (
            percentile_sorted(&sorted, lower_pct),
            percentile_sorted(&sorted, upper_pct),
        ) else {
            return Err(IndicatorError::MissingData {
                column: column.to_string(),
            });
        };

        if p_low == p_high {
            tracing::debug!("{}: degenerate bounds at {}, bumping upper", column, p_low);
            p_high = bump_upper(p_low);
        }

        tracing::debug!(
            "{}: p{} = {}, p{} = {} ({} values)",
            column, lower_pct, p_low, upper_pct, p_high, sorted.len()
        );

        bounds.insert(column, (p_low, p_high));
    }

    Ok(bounds)
}

/// Smallest `f64` strictly greater than a finite `x`
fn next_up(x: f64) -> f64 {
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Upper bound for a degenerate `(p, p)` pair
///
/// `p + 1e-9` rounds back to `p` once `|p| >= 2^24`; past that point the next
/// representable value is used so the pair stays strictly ordered.
fn bump_upper(p: f64) -> f64 {
    let bumped = p + DEGENERATE_BOUNDS_EPSILON;
    if bumped > p || !p.is_finite() {
        bumped
    } else {
        next_up(p)
    }
}

/// Scale one raw value into `[0, 1]` using `(lower, upper)`
///
/// Returns NaN only when the inputs themselves make the ratio undefined
/// (NaN or infinite bounds); [`apply_nutrient_index`] stores that as missing.
pub fn normalize_value(raw: f64, (lower, upper): (f64, f64)) -> f64 {
    ((raw - lower) / (upper - lower)).clamp(0.0, 1.0)
}

/// Append normalized columns and the synthetic index using fixed bounds
///
/// The input is left untouched; the returned frame holds every original
/// column and row in order, followed by one normalized column per configured
/// nutrient and finally `config.index_column`.
///
/// The index is the mean of the normalized values present in the row, times
/// 100. A row with some nutrients missing averages the rest; a row with all
/// of them missing gets a missing index.
///
/// # Errors
/// - `MissingColumn` if a configured column is absent from `df`
/// - `MissingBounds` if `bounds` has no entry for a configured column
pub fn apply_nutrient_index(
    df: &DataFrame,
    config: &NutrientIndexConfig,
    bounds: &PercentileBounds,
) -> Result<DataFrame> {
    let mut df_out = df.clone();
    let n_rows = df.height();

    let mut sums = vec![0.0_f64; n_rows];
    let mut counts = vec![0_usize; n_rows];

    for column in &config.columns {
        require_column(df, column)?;
        let column_bounds = bounds.get(column).ok_or_else(|| IndicatorError::MissingBounds {
            column: column.clone(),
        })?;

        let normalized: Vec<Option<f64>> = numeric_values(df, column)?
            .into_iter()
            .map(|raw| {
                raw.map(|v| normalize_value(v, column_bounds))
                    .filter(|n| !n.is_nan())
            })
            .collect();

        for (row, value) in normalized.iter().enumerate() {
            if let Some(v) = value {
                sums[row] += v;
                counts[row] += 1;
            }
        }

        let name = config.normalized_column_name(column);
        df_out.with_column(Series::new(name.as_str().into(), normalized))?;
    }

    let index: Vec<Option<f64>> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| (count > 0).then(|| sum / count as f64 * 100.0))
        .collect();

    df_out.with_column(Series::new(config.index_column.as_str().into(), index))?;

    tracing::debug!(
        "Nutrient index '{}' computed over {} rows from {} columns",
        config.index_column,
        n_rows,
        config.columns.len()
    );

    Ok(df_out)
}

/// Fit bounds on `df` and apply them to the same frame
///
/// Returns the augmented frame and the bounds that were used, so they can be
/// saved and reapplied to other data.
pub fn fit_nutrient_index(
    df: &DataFrame,
    config: &NutrientIndexConfig,
) -> Result<(DataFrame, PercentileBounds)> {
    let bounds = compute_percentile_bounds(df, &config.columns, config.lower_pct, config.upper_pct)?;
    let df_out = apply_nutrient_index(df, config, &bounds)?;
    Ok((df_out, bounds))
}
