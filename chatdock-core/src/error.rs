use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::NETWORK_ERROR_TEXT;

/// Errors that can occur when loading or validating widget configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse inline config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("storage key must not be empty")]
    EmptyStorageKey,

    #[error("default size {width}x{height} is below the {min_width}x{min_height} floor")]
    DefaultBelowMinimum {
        width: f64,
        height: f64,
        min_width: f64,
        min_height: f64,
    },

    #[error("viewport margin must be a non-negative number, got {0}")]
    InvalidMargin(f64),
}

/// Failures of the durable key-value slot. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    pub fn read(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Read {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn write(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Write {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A request that never produced an HTTP response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error calling '{endpoint}': {reason}")]
    Network { endpoint: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl TransportError {
    pub fn network(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Text shown in the transcript for this failure
    pub fn user_message(&self) -> &'static str {
        NETWORK_ERROR_TEXT
    }
}
