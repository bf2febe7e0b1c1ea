//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from the JSON config file.
//! Every field is optional: a missing key or an explicit `null` leaves the
//! field at its zero value. Declared keys match case-insensitively (an exact
//! match wins); keys inside `email.templates` are kept as written.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown instead of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// Listener settings.
    #[serde(deserialize_with = "null_as_default")]
    pub server: ServerConfig,

    /// Deployment environment name (e.g. "production").
    #[serde(rename = "env", deserialize_with = "null_as_default")]
    pub environment: String,

    #[serde(deserialize_with = "null_as_default")]
    pub debug: bool,

    /// Token signing material.
    #[serde(deserialize_with = "null_as_default")]
    pub jwt: JwtConfig,

    /// SQL data store connection parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub db: SqlConfig,

    /// Outgoing email settings.
    #[serde(deserialize_with = "null_as_default")]
    pub email: EmailConfig,
}

impl Configuration {
    /// Decode a parsed JSON document, folding declared keys to their
    /// canonical case first.
    pub fn from_json_value(mut value: Value) -> serde_json::Result<Self> {
        fold_declared_keys(&mut value);
        serde_json::from_value(value)
    }

    /// Copy of this configuration with every secret replaced by [`REDACTED`].
    ///
    /// Empty secrets stay empty so that a missing value is still visible.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.jwt.priv_key);
        mask(&mut copy.db.password);
        mask(&mut copy.email.auth.password);
        copy
    }
}

fn mask(secret: &mut String) {
    if !secret.is_empty() {
        *secret = REDACTED.to_string();
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,

    /// Port, kept as text exactly as written in the file.
    #[serde(deserialize_with = "null_as_default")]
    pub port: String,

    /// Scheme clients use to reach the server (e.g. "https").
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,

    #[serde(deserialize_with = "null_as_default")]
    pub api_version: String,
}

impl ServerConfig {
    /// `host:port` as written in the file.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// JWT key material. Read-only outside this crate.
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct JwtConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) pub_key: String,

    #[serde(deserialize_with = "null_as_default")]
    pub(crate) priv_key: String,

    #[serde(deserialize_with = "null_as_default")]
    pub(crate) audience: String,
}

impl JwtConfig {
    pub fn pub_key(&self) -> &str {
        &self.pub_key
    }

    pub fn priv_key(&self) -> &str {
        &self.priv_key
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("pub_key", &self.pub_key)
            .field("priv_key", &REDACTED)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Connection parameters for a SQL database.
///
/// Nothing in this crate opens a connection; the values are handed to
/// whichever component does.
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SqlConfig {
    /// Address of the database server.
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,

    #[serde(deserialize_with = "null_as_default")]
    pub port: String,

    /// User with access to the database.
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,

    #[serde(deserialize_with = "null_as_default")]
    pub password: String,

    /// Database name (must already exist).
    #[serde(deserialize_with = "null_as_default")]
    pub database: String,
}

impl fmt::Debug for SqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("database", &self.database)
            .finish()
    }
}

/// Email delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EmailConfig {
    /// Delivery provider name (e.g. "smtp").
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,

    #[serde(deserialize_with = "null_as_default")]
    pub host: String,

    #[serde(deserialize_with = "null_as_default")]
    pub port: String,

    #[serde(deserialize_with = "null_as_default")]
    pub tls: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub auth: EmailAuthConfig,

    /// Template name -> template identifier or path.
    #[serde(deserialize_with = "null_as_default")]
    pub templates: HashMap<String, String>,
}

/// Credentials for the email provider. Read-only outside this crate.
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EmailAuthConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub(crate) username: String,

    #[serde(deserialize_with = "null_as_default")]
    pub(crate) password: String,
}

impl EmailAuthConfig {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for EmailAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailAuthConfig")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

const ROOT_KEYS: &[&str] = &["server", "env", "debug", "jwt", "db", "email"];
const SERVER_KEYS: &[&str] = &["host", "port", "protocol", "api_version"];
const JWT_KEYS: &[&str] = &["pub_key", "priv_key", "audience"];
const DB_KEYS: &[&str] = &["host", "port", "user", "password", "database"];
const EMAIL_KEYS: &[&str] = &["provider", "host", "port", "tls", "auth", "templates"];
const EMAIL_AUTH_KEYS: &[&str] = &["username", "password"];

/// Rename keys of the known records to their declared spelling.
///
/// Map contents (`email.templates`) and unknown keys are left alone.
fn fold_declared_keys(value: &mut Value) {
    fold_object(value, ROOT_KEYS);

    let Value::Object(root) = value else {
        return;
    };
    for (key, declared) in [
        ("server", SERVER_KEYS),
        ("jwt", JWT_KEYS),
        ("db", DB_KEYS),
        ("email", EMAIL_KEYS),
    ] {
        if let Some(nested) = root.get_mut(key) {
            fold_object(nested, declared);
        }
    }
    if let Some(auth) = root.get_mut("email").and_then(|email| email.get_mut("auth")) {
        fold_object(auth, EMAIL_AUTH_KEYS);
    }
}

fn fold_object(value: &mut Value, declared: &[&str]) {
    let Value::Object(map) = value else {
        return;
    };

    let mut exact = Vec::new();
    for (key, field) in std::mem::take(map) {
        match declared.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
            Some(name) if *name == key => exact.push((key, field)),
            Some(name) => {
                map.insert(name.to_string(), field);
            }
            None => {
                map.insert(key, field);
            }
        }
    }
    // Exact spellings override folded ones
    for (key, field) in exact {
        map.insert(key, field);
    }
}

/// Treats an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config: Configuration = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Configuration::default());
        assert!(config.email.templates.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn test_json_key_names() {
        let config: Configuration = serde_json::from_str(
            r#"{
                "env": "staging",
                "server": {"api_version": "v2"},
                "jwt": {"pub_key": "pub", "priv_key": "priv", "audience": "aud"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.server.api_version, "v2");
        assert_eq!(config.jwt.pub_key(), "pub");
        assert_eq!(config.jwt.priv_key(), "priv");
        assert_eq!(config.jwt.audience(), "aud");
    }

    #[test]
    fn test_null_is_zero_value() {
        let config: Configuration = serde_json::from_str(
            r#"{"env": null, "debug": null, "db": null, "email": {"templates": null, "auth": null}}"#,
        )
        .unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: Configuration =
            serde_json::from_str(r#"{"debug": true, "extra": [1, 2], "db": {"pool": 5}}"#).unwrap();
        assert!(config.debug);
        assert_eq!(config.db, SqlConfig::default());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        assert!(serde_json::from_str::<Configuration>(r#"{"env": ["a"]}"#).is_err());
        assert!(serde_json::from_str::<Configuration>(r#"{"email": {"port": 587}}"#).is_err());
        assert!(serde_json::from_str::<Configuration>(r#"{"debug": "yes"}"#).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: Configuration = serde_json::from_str(
            r#"{
                "jwt": {"priv_key": "very-private"},
                "db": {"password": "db-secret"},
                "email": {"auth": {"username": "mailer", "password": "mail-secret"}}
            }"#,
        )
        .unwrap();

        let out = format!("{:?}", config);
        assert!(!out.contains("very-private"));
        assert!(!out.contains("db-secret"));
        assert!(!out.contains("mail-secret"));
        assert!(out.contains("mailer"));
    }

    #[test]
    fn test_redacted_copy() {
        let mut config = Configuration::default();
        config.db.password = "secret".into();
        config.db.user = "app".into();

        let redacted = config.redacted();
        assert_eq!(redacted.db.password, REDACTED);
        assert_eq!(redacted.db.user, "app");
        // Unset secrets are left empty
        assert_eq!(redacted.jwt.priv_key(), "");
        // Original untouched
        assert_eq!(config.db.password, "secret");
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let config = Configuration::from_json_value(serde_json::json!({
            "ENV": "production",
            "Debug": true,
            "Server": {"Host": "h", "API_VERSION": "v1"},
            "DB": {"Password": "secret"},
            "Email": {"TLS": true, "Auth": {"UserName": "mailer"}}
        }))
        .unwrap();

        assert_eq!(config.environment, "production");
        assert!(config.debug);
        assert_eq!(config.server.host, "h");
        assert_eq!(config.server.api_version, "v1");
        assert_eq!(config.db.password, "secret");
        assert!(config.email.tls);
        assert_eq!(config.email.auth.username(), "mailer");
    }

    #[test]
    fn test_exact_key_wins_over_folded() {
        let config = Configuration::from_json_value(serde_json::json!({
            "ENV": "folded",
            "env": "exact",
            "server": {"HOST": "folded", "host": "exact"}
        }))
        .unwrap();

        assert_eq!(config.environment, "exact");
        assert_eq!(config.server.host, "exact");
    }

    #[test]
    fn test_template_names_keep_case() {
        let config = Configuration::from_json_value(serde_json::json!({
            "email": {"Templates": {"Welcome": "welcome.html", "RESET": "reset.html"}}
        }))
        .unwrap();

        let mut names: Vec<_> = config.email.templates.keys().cloned().collect();
        names.sort();
        assert_eq!(names, vec!["RESET".to_string(), "Welcome".to_string()]);
    }

    #[test]
    fn test_top_level_null_rejected() {
        assert!(Configuration::from_json_value(Value::Null).is_err());
    }

    #[test]
    fn test_server_address() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: "8080".into(),
            ..Default::default()
        };
        assert_eq!(server.address(), "0.0.0.0:8080");
    }
}
