//! Nutrition Analytics
//!
//! Helpers for the thesis analysis notebooks over OpenFoodFacts and
//! Eurostat data:
//!
//! - `paths`: `data_raw` / `data_processed` / `notebooks` path building
//! - `db`: DuckDB connection helper (feature `duckdb`, on by default)
//! - `indicators`: percentile-clipped nutrient density index
//! - `viz`: quadrant labels for two-indicator comparisons
//!
//! Everything works on Polars DataFrames that the caller has already loaded.

pub mod error;
pub mod utils;
pub mod paths;
#[cfg(feature = "duckdb")]
pub mod db;
pub mod indicators;
pub mod viz;
pub mod logging;

// Re-export commonly used types
pub use error::{IndicatorError, Result};
pub use paths::{data_processed_path, data_raw_path, notebooks_path, project_root, ProjectPaths};
#[cfg(feature = "duckdb")]
pub use db::connect_duckdb;
pub use indicators::{
    apply_nutrient_index, compute_percentile_bounds, fit_nutrient_index, NutrientIndexConfig,
    PercentileBounds,
};
pub use viz::{classify_quadrant, quadrant_series, Quadrant};
