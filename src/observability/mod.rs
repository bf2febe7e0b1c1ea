//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config loader / store / overlay
//!     → tracing events (path, error, environment)
//!     → logging.rs subscriber
//!     → stdout
//! ```

pub mod logging;
