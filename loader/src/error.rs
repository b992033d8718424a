//! Error types for schema document loading.
//!
//! Covers every failure between a path on disk and a validated
//! [`Schema`](argschema_core::Schema): I/O, JSON or YAML syntax, an
//! unrecognized file format, and schema validation itself.

use std::path::PathBuf;

use argschema_core::SchemaError;
use thiserror::Error;

/// Errors that can occur while loading a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A path argument is missing or not a schema document.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Content is neither valid JSON nor valid YAML.
    #[error("unsupported schema document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The document parsed but describes an invalid schema.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
