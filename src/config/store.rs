//! Shared holder for the loaded configuration.
//!
//! # Design Decisions
//! - The current snapshot lives in an `ArcSwapOption`: writers swap the
//!   pointer atomically, readers never block
//! - Readers get an `Arc<Configuration>`; a snapshot stays valid after a
//!   later load replaces it
//! - Concurrent loads: last write wins
//! - A failed load leaves the current snapshot untouched

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::loader::{load_config, ConfigResult};
use crate::config::schema::Configuration;

/// Holds at most one configuration snapshot.
///
/// Own one directly to pass configuration by reference, or use the
/// process-wide instance through [`load`] and [`get`].
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwapOption<Configuration>,
}

impl ConfigStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            current: ArcSwapOption::const_empty(),
        }
    }

    /// Load `path` and make it the current snapshot.
    ///
    /// On error the previous snapshot (if any) stays in place.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<Arc<Configuration>> {
        let config = load_config(path)?;
        Ok(self.replace(config))
    }

    /// Install an already built configuration.
    pub fn replace(&self, config: Configuration) -> Arc<Configuration> {
        let config = Arc::new(config);
        self.current.store(Some(Arc::clone(&config)));
        tracing::debug!(environment = %config.environment, "Configuration replaced");
        config
    }

    /// Current snapshot, `None` until a load succeeds.
    pub fn get(&self) -> Option<Arc<Configuration>> {
        self.current.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Drop the current snapshot.
    pub fn clear(&self) {
        self.current.store(None);
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: ConfigStore = ConfigStore::new();

/// The process-wide store.
pub fn global() -> &'static ConfigStore {
    &GLOBAL
}

/// Load `path` into the process-wide store.
pub fn load(path: impl AsRef<Path>) -> ConfigResult<Arc<Configuration>> {
    GLOBAL.load(path)
}

/// The process-wide configuration, `None` if nothing has been loaded.
pub fn get() -> Option<Arc<Configuration>> {
    GLOBAL.get()
}
