//! Tracing setup for notebook-style drivers and tests
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to whoever drives the analysis.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "nutrition_analytics=info,warn";

/// Install a fmt subscriber filtered by `RUST_LOG` (or [`DEFAULT_FILTER`])
///
/// Returns `false` if a global subscriber was already installed, so calling
/// it more than once is harmless.
pub fn init_tracing() -> bool {
    init_tracing_with(DEFAULT_FILTER)
}

/// Like [`init_tracing`] with a caller-chosen fallback filter
pub fn init_tracing_with(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
