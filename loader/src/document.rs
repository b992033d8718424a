//! Serializable schema documents.
//!
//! A [`SchemaDocument`] is the on-disk form of a program interface: its
//! name, description, ordered argument descriptors and parse options.
//!
//! # Example YAML
//!
//! ```yaml
//! name: tool
//! description: Processes a file.
//! options:
//!   reject_inline_flag_values: false
//! args:
//!   - name: input
//!     positional: true
//!     required: true
//!     help: Input file
//!   - name: output
//!     short: o
//!     help: Output file
//!   - name: verbose
//!     short: v
//!     kind: boolean
//!     flag: true
//!   - name: repeat
//!     short: n
//!     kind: int
//!     default: "1"
//! ```

use std::ffi::OsStr;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use argschema_core::{ArgDescriptor, ParseOptions, Schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detects the format from a file extension (`.json`, `.yml`, `.yaml`).
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_loader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path("tool.yaml"), Some(DocumentFormat::Yaml));
    /// assert_eq!(DocumentFormat::from_path("tool.json"), Some(DocumentFormat::Json));
    /// assert_eq!(DocumentFormat::from_path("tool.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension().and_then(OsStr::to_str) {
            Some("json") => Some(Self::Json),
            Some("yml" | "yaml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// On-disk form of a program's argument schema.
///
/// # Examples
///
/// ```
/// use argschema_loader::SchemaDocument;
///
/// let doc = SchemaDocument::from_json_str(r#"{
///     "name": "tool",
///     "args": [
///         {"name": "input", "positional": true, "required": true},
///         {"name": "verbose", "short": "v", "kind": "boolean", "flag": true}
///     ]
/// }"#).unwrap();
///
/// let schema = doc.into_schema().unwrap();
/// let args = schema.parse(["tool", "-v", "in.txt"]).unwrap();
/// assert!(args.get::<bool>("verbose").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Program name shown in usage output.
    pub name: String,
    /// Free-text description shown under the usage line.
    #[serde(default)]
    pub description: String,
    /// Parse engine options.
    #[serde(default)]
    pub options: ParseOptions,
    /// Argument descriptors in declaration order.
    #[serde(default)]
    pub args: Vec<ArgDescriptor>,
}

impl SchemaDocument {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::JsonError`] if the text is not a valid document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::YamlError`] if the text is not a valid document.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads a document, choosing the format from the file extension.
    ///
    /// Files without a recognized extension are tried as JSON, then YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::IoError`] if the file cannot be read,
    /// [`LoadError::JsonError`] / [`LoadError::YamlError`] for a malformed
    /// document, or [`LoadError::UnsupportedFormat`] when an unrecognized
    /// file parses as neither.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = match DocumentFormat::from_path(path) {
            Some(DocumentFormat::Json) => {
                let reader = BufReader::new(std::fs::File::open(path)?);
                serde_json::from_reader(reader)?
            }
            Some(DocumentFormat::Yaml) => {
                let reader = BufReader::new(std::fs::File::open(path)?);
                serde_yaml::from_reader(reader)?
            }
            None => {
                let raw = std::fs::read_to_string(path)?;
                Self::from_json_str(&raw)
                    .or_else(|_| Self::from_yaml_str(&raw))
                    .map_err(|_| LoadError::UnsupportedFormat(path.to_path_buf()))?
            }
        };
        debug!(path = %path.display(), "schema document loaded");
        Ok(doc)
    }

    /// Saves the document, choosing the format from the file extension
    /// (JSON when unrecognized).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::IoError`] if the file cannot be written, or a
    /// serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match DocumentFormat::from_path(path) {
            Some(DocumentFormat::Yaml) => serde_yaml::to_writer(writer, self)?,
            _ => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Captures a validated schema as a document.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            name: schema.name().to_string(),
            description: schema.description().to_string(),
            options: schema.options(),
            args: schema.args().to_vec(),
        }
    }

    /// Validates the document and builds a [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Schema`] with the first validation failure.
    pub fn into_schema(self) -> Result<Schema> {
        let schema = Schema::new(self.name, self.description, self.args)?;
        Ok(schema.with_options(self.options))
    }
}

/// Loads and validates a schema document in one step.
///
/// # Errors
///
/// See [`SchemaDocument::load`] and [`SchemaDocument::into_schema`].
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    SchemaDocument::load(path)?.into_schema()
}
