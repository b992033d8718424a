//! Declarative command-line argument schemas.
//!
//! This crate validates a list of argument descriptors once, derives the
//! type of every result field from it, and matches token sequences against
//! it:
//!
//! - [`ArgDescriptor`]: one declared argument with its spelling, kind,
//!   default and choices.
//! - [`Schema`]: a validated, immutable list of descriptors. Building one
//!   runs [`validate_descriptors`] and fails with a [`SchemaError`].
//! - [`derive_field_type`]: maps a descriptor to its [`FieldType`].
//! - [`Schema::parse`]: reduces tokens to a [`ParsedArgs`] record or a
//!   [`ParseError`].
//! - [`render_help`]: plain-text usage and option listing.
//! - [`codegen::generate_record`]: Rust source for a typed record that
//!   implements [`FromParsedArgs`].
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! let schema = Schema::new(
//!     "tool",
//!     "Copies a file.",
//!     vec![
//!         ArgDescriptor::positional("input", ArgKind::String).with_help("Input file"),
//!         ArgDescriptor::option("output", ArgKind::String).with_short('o'),
//!         ArgDescriptor::flag("verbose").with_short('v'),
//!         ArgDescriptor::option("repeat", ArgKind::Int).with_short('n').with_default("1"),
//!     ],
//! )
//! .unwrap();
//!
//! let args = schema.parse(["tool", "-vn", "3", "in.txt"]).unwrap();
//! assert_eq!(args.get::<String>("input").unwrap(), "in.txt");
//! assert!(args.get::<bool>("verbose").unwrap());
//! assert_eq!(args.get::<Option<i64>>("repeat").unwrap(), Some(3));
//!
//! assert_eq!(schema.parse(["tool"]), Err(ParseError::MissingRequired("input".into())));
//! ```

pub mod codegen;
mod derive;
mod error;
mod help;
mod parser;
mod record;
mod schema;
mod types;
mod validate;
mod value;

pub use derive::{BaseType, FieldDefault, FieldType, derive_field_default, derive_field_type};
pub use error::{ParseError, TypedParseError};
pub use help::{render_help, render_help_as, usage_line, usage_line_as};
pub use parser::ParseOptions;
pub use record::{FromParsedArgs, FromValue, ParsedArgs, RecordError};
pub use schema::Schema;
pub use types::{ArgDescriptor, ArgKind};
pub use validate::{HELP_NAME, HELP_SHORT, SchemaError, validate_descriptors};
pub use value::{CoerceError, Value, coerce, parse_bool};
