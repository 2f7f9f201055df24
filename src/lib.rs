//! Weekly meal planning: plan recipes per day and meal, derive a shopping
//! list, keep favorites and the preference quiz, and search recipes through
//! the Spoonacular API.

pub mod api_connection;
pub mod app;
pub mod cli;
pub mod config;
pub mod favorites;
pub mod planner;
pub mod quiz;
pub mod recipe;
pub mod shopping_list;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// default `plate_up=info` filter. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("plate_up=info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!("tracing initialized");
    });
}
