//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Events are written to stdout by the fmt layer
//! - `RUST_LOG` wins over the level passed by the caller

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Calling it a second time is a no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn default_filter(level: &str) -> String {
    format!("service_config={level}")
}
