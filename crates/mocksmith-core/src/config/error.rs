//! Error types for definition loading.

use std::io;
use thiserror::Error;

/// Definition loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a definition file failed
    #[error("failed to read '{path}': {source}")]
    Io {
        #[source]
        source: io::Error,
        path: String,
    },
    /// Invalid glob pattern for route discovery
    #[error("invalid glob pattern: {0}")]
    GlobPattern(String),
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Parsed content does not describe a valid definition
    #[error("invalid definition in '{path}': {source}")]
    Definition {
        #[source]
        source: serde_json::Error,
        path: String,
    },
    /// Unknown file type
    #[error("unknown file type: {0}")]
    UnknownFileType(String),
    /// The collections file defines no collections
    #[error("no collections defined in '{0}'")]
    EmptyCollections(String),
}
