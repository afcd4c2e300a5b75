//! Synthetic indices built from raw indicator columns
//!
//! - Nutrition: OpenFoodFacts nutrient density index (percentile-clipped)

pub mod nutrition;

pub use nutrition::{
    apply_nutrient_index, compute_percentile_bounds, fit_nutrient_index, normalize_value,
    NutrientIndexConfig, PercentileBounds, NUTRIENT_COLUMNS_DEFAULT,
};
