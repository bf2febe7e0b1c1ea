//! Explicit environment overlay.
//!
//! Never applied by the loader. Callers that want secrets from the
//! environment build an [`EnvOverlay`] and apply it to a loaded
//! configuration before installing it in a store.
//!
//! # Precedence
//! - A bound variable that is set (even to `""`) overwrites the file value
//! - An unset variable leaves the file value as is

use std::env;

use crate::config::schema::Configuration;

/// Variable that overrides the database name.
pub const CONNECTION_STRING_VAR: &str = "Connection_String";

/// String fields an overlay binding can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayField {
    ServerHost,
    ServerPort,
    DbHost,
    DbPort,
    DbUser,
    DbPassword,
    DbDatabase,
    JwtPubKey,
    JwtPrivKey,
    EmailAuthUsername,
    EmailAuthPassword,
}

impl OverlayField {
    fn slot(self, config: &mut Configuration) -> &mut String {
        match self {
            OverlayField::ServerHost => &mut config.server.host,
            OverlayField::ServerPort => &mut config.server.port,
            OverlayField::DbHost => &mut config.db.host,
            OverlayField::DbPort => &mut config.db.port,
            OverlayField::DbUser => &mut config.db.user,
            OverlayField::DbPassword => &mut config.db.password,
            OverlayField::DbDatabase => &mut config.db.database,
            OverlayField::JwtPubKey => &mut config.jwt.pub_key,
            OverlayField::JwtPrivKey => &mut config.jwt.priv_key,
            OverlayField::EmailAuthUsername => &mut config.email.auth.username,
            OverlayField::EmailAuthPassword => &mut config.email.auth.password,
        }
    }
}

/// Ordered list of `(variable, field)` bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverlay {
    bindings: Vec<(String, OverlayField)>,
}

impl EnvOverlay {
    /// Overlay with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding. Later bindings for the same field win.
    pub fn bind(mut self, var: impl Into<String>, field: OverlayField) -> Self {
        self.bindings.push((var.into(), field));
        self
    }

    pub fn bindings(&self) -> &[(String, OverlayField)] {
        &self.bindings
    }

    /// Apply using the process environment.
    pub fn apply(&self, config: &mut Configuration) -> Vec<String> {
        self.apply_with(config, |var| env::var(var).ok())
    }

    /// Apply using `lookup` to resolve variables.
    ///
    /// Returns the names of the variables that were set.
    pub fn apply_with<F>(&self, config: &mut Configuration, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        for (var, field) in &self.bindings {
            if let Some(value) = lookup(var) {
                *field.slot(config) = value;
                applied.push(var.clone());
            }
        }

        if !applied.is_empty() {
            tracing::info!(variables = ?applied, "Applied environment overlay");
        }
        applied
    }
}

impl Default for EnvOverlay {
    /// Only `Connection_String` -> `db.database`.
    fn default() -> Self {
        Self::empty().bind(CONNECTION_STRING_VAR, OverlayField::DbDatabase)
    }
}
