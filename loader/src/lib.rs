//! # argschema-loader
//!
//! Loads declarative argument schemas from JSON and YAML documents and
//! validates them into [`argschema_core::Schema`] values.
//!
//! ## Usage
//!
//! ```no_run
//! use argschema_loader::load_schema;
//!
//! let schema = load_schema("tool.yaml")?;
//! let args = schema.parse_from_env();
//! # Ok::<(), argschema_loader::LoadError>(())
//! ```
//!
//! Batch commands can expand directories with [`collect_schema_paths`] and
//! validate many documents at once with [`load_all`].

mod document;
mod error;
mod paths;

pub use document::{DocumentFormat, SchemaDocument, load_schema};
pub use error::{LoadError, Result};
pub use paths::{LoadReport, collect_schema_paths, load_all};
