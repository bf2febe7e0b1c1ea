//! Configuration loading from disk.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::de;
use serde_json::{Deserializer, Value};
use thiserror::Error;

use crate::config::schema::Configuration;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path could not be opened for reading.
    #[error("cannot open config file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a JSON document of the expected shape.
    #[error("cannot decode config file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::FileOpen { path, .. } | ConfigError::Decode { path, .. } => path,
        }
    }

    pub fn is_file_open(&self) -> bool {
        matches!(self, ConfigError::FileOpen { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ConfigError::Decode { .. })
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from a JSON file.
///
/// Only the first JSON value in the file is decoded, and it must be an
/// object: a top-level `null` is a decode error. Does not touch any
/// [`ConfigStore`](crate::config::store::ConfigStore).
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Configuration> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading config file");

    decode_file(path).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to load config file");
    })
}

fn decode_file(path: &Path) -> ConfigResult<Configuration> {
    let file_open = |source: io::Error| ConfigError::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_open)?;
    if file.metadata().map_err(file_open)?.is_dir() {
        return Err(file_open(io::Error::new(
            io::ErrorKind::InvalidInput,
            "is a directory",
        )));
    }

    let decode = |source: serde_json::Error| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    };

    // `file` is dropped (closed) when this function returns, on every path.
    let mut stream = Deserializer::from_reader(BufReader::new(file)).into_iter::<Value>();
    match stream.next() {
        Some(result) => result
            .and_then(Configuration::from_json_value)
            .map_err(decode),
        None => Err(decode(de::Error::custom("empty config file"))),
    }
}
