//! Typed JSON configuration loading with a process-wide snapshot.

pub mod config;
pub mod observability;

pub use config::schema::Configuration;
pub use config::{get, load, ConfigError, ConfigStore};
