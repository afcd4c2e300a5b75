//! Utility modules shared by the indicators and the quadrant classifier
//!
//! - Stats: percentiles and medians with linear interpolation
//! - Columns: validated column lookup and numeric extraction

pub mod stats;
pub mod columns;

// Re-export commonly used helpers
pub use stats::{median, percentile, percentile_sorted};
pub use columns::{numeric_values, present_values, require_column};
