//! Error types for configuration and registry construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the type registry or loading its config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Duplicate type '{0}' in registry")]
    DuplicateType(String),

    #[error("Type '{type_name}' has an empty {field}")]
    EmptyField {
        type_name: String,
        field: &'static str,
    },

    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(String),

    #[error("Invalid markers: {0}")]
    InvalidMarkers(String),

    #[error("Invalid template list: {0}")]
    InvalidTemplates(String),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
