//! Shared utilities for integration tests.

use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a fresh temporary file.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A config file touching every section.
#[allow(dead_code)]
pub const FULL_CONFIG: &str = r#"{
    "server": {"host": "0.0.0.0", "port": "8080", "protocol": "https", "api_version": "v1"},
    "env": "production",
    "debug": false,
    "jwt": {"pub_key": "keys/pub.pem", "priv_key": "keys/priv.pem", "audience": "api"},
    "db": {"host": "db.local", "port": "5432", "user": "app", "password": "secret", "database": "appdb"},
    "email": {
        "provider": "smtp",
        "host": "mail.local",
        "port": "587",
        "tls": true,
        "auth": {"username": "mailer", "password": "mail-secret"},
        "templates": {"welcome": "welcome.html", "reset": "reset.html"}
    }
}"#;
