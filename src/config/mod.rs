//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (open, stream-decode)
//!     → Configuration (immutable snapshot)
//!     → overlay.rs (optional, explicit env overlay)
//!     → store.rs (atomic swap of Arc<Configuration>)
//!     → readers call get()
//! ```
//!
//! # Design Decisions
//! - Every field defaults to its zero value; `{}` is a valid config
//! - Declared keys match in any case; unknown keys are ignored, wrong types
//!   for declared keys are errors
//! - No value validation and no hot reload
//! - Failed loads never touch the stored snapshot

pub mod loader;
pub mod overlay;
pub mod schema;
pub mod store;

pub use loader::{load_config, ConfigError, ConfigResult};
pub use overlay::{EnvOverlay, OverlayField};
pub use schema::{
    Configuration, EmailAuthConfig, EmailConfig, JwtConfig, ServerConfig, SqlConfig,
};
pub use store::{get, global, load, ConfigStore};
