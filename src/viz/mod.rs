//! Helpers for reading indicators visually
//!
//! - Quadrants: "high/low vs high/low" labels for two indicators

pub mod quadrants;

pub use quadrants::{classify_quadrant, classify_quadrants, quadrant_series, Quadrant};
