//! Schema validation.
//!
//! Validates the structural invariants of a descriptor list once, before any
//! token is parsed. A failure here is a mistake in the schema author's code,
//! never in the user's command line, and is reported through
//! [`SchemaError`] rather than [`ParseError`](crate::ParseError).
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! let args = vec![
//!     ArgDescriptor::positional("input", ArgKind::String),
//!     ArgDescriptor::flag("verbose").with_short('v'),
//! ];
//! assert!(validate_descriptors(&args).is_ok());
//!
//! // Invalid: a flag cannot carry an integer
//! let mut bad = ArgDescriptor::flag("level");
//! bad.kind = ArgKind::Int;
//! assert_eq!(
//!     validate_descriptors(&[bad]),
//!     Err(SchemaError::FlagKindMismatch { name: "level".into(), kind: ArgKind::Int })
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;
use tracing::trace;

use crate::codegen::rust_ident;
use crate::{ArgDescriptor, ArgKind, CoerceError, Value, coerce};

/// Name and short binding reserved for the built-in help entry.
pub const HELP_NAME: &str = "help";
pub const HELP_SHORT: char = 'h';

/// Schema validation errors.
///
/// Each variant names the offending descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Descriptor name is empty or whitespace-only.
    #[error("argument name cannot be empty")]
    EmptyName,
    /// Descriptor name cannot be spelled as a long option: it starts with
    /// `-` or contains `=` or whitespace.
    #[error("argument name `{0}` cannot be used as a long option")]
    InvalidName(String),
    /// Descriptor uses the name or short binding of the built-in help entry.
    #[error("argument `{0}` collides with the built-in help option")]
    ReservedName(String),
    /// Two descriptors share a name.
    #[error("duplicate argument name: {0}")]
    DuplicateName(String),
    /// Two distinct names map to the same record field identifier.
    #[error("argument `{name}` maps to field `{field}`, which an earlier argument already uses")]
    FieldCollision { name: String, field: String },
    /// Short binding cannot be spelled as a short option.
    #[error("argument `{name}` has an invalid short binding `{short}`")]
    InvalidShort { name: String, short: char },
    /// Two descriptors share a short binding.
    #[error("argument `{name}` reuses short binding `-{short}`")]
    DuplicateShort { name: String, short: char },
    /// Multi-value collection is not supported.
    #[error("argument `{0}` requests multiple values, which is unsupported")]
    MultiValueUnsupported(String),
    /// A descriptor is both positional and a flag.
    #[error("argument `{0}` cannot be both positional and a flag")]
    PositionalFlagConflict(String),
    /// A flag descriptor whose kind is neither boolean nor count.
    #[error("flag `{name}` must be boolean or count, not {kind}")]
    FlagKindMismatch { name: String, kind: ArgKind },
    /// A required positional declared after an optional one.
    #[error("required positional `{0}` follows an optional positional")]
    RequiredAfterOptionalPositional(String),
    /// Literal default does not coerce to the descriptor's kind.
    #[error("default for `{name}` is invalid: {source}")]
    InvalidDefault {
        name: String,
        #[source]
        source: CoerceError,
    },
    /// Literal default is not one of the descriptor's choices.
    #[error("default `{default}` for `{name}` is not one of its choices")]
    DefaultNotInChoices { name: String, default: String },
}

/// Validates a descriptor list and coerces its literal defaults.
///
/// Checks run in declaration order and stop at the first violation. On
/// success the returned vector holds one coerced default per descriptor.
///
/// # Errors
///
/// Returns the first [`SchemaError`] found.
pub fn validate_descriptors(args: &[ArgDescriptor]) -> Result<Vec<Option<Value>>, SchemaError> {
    let mut names: HashSet<&str> = HashSet::new();
    let mut fields: HashSet<String> = HashSet::new();
    let mut shorts: HashSet<char> = HashSet::new();
    let mut seen_optional_positional = false;
    let mut defaults = Vec::with_capacity(args.len());

    for arg in args {
        let name = arg.name.as_str();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }
        if name.starts_with('-') || name.contains(|c: char| c == '=' || c.is_whitespace()) {
            return Err(SchemaError::InvalidName(name.to_string()));
        }
        if name == HELP_NAME || arg.short == Some(HELP_SHORT) {
            return Err(SchemaError::ReservedName(name.to_string()));
        }
        if !names.insert(name) {
            return Err(SchemaError::DuplicateName(name.to_string()));
        }
        let field = rust_ident(&arg.field_ident());
        if !fields.insert(field.clone()) {
            return Err(SchemaError::FieldCollision {
                name: name.to_string(),
                field,
            });
        }

        if let Some(short) = arg.short {
            if short == '-' || short.is_whitespace() || short.is_ascii_digit() {
                return Err(SchemaError::InvalidShort {
                    name: name.to_string(),
                    short,
                });
            }
            if !shorts.insert(short) {
                return Err(SchemaError::DuplicateShort {
                    name: name.to_string(),
                    short,
                });
            }
        }

        if arg.multi {
            return Err(SchemaError::MultiValueUnsupported(name.to_string()));
        }
        if arg.positional && arg.flag {
            return Err(SchemaError::PositionalFlagConflict(name.to_string()));
        }
        if arg.flag && !matches!(arg.kind, ArgKind::Boolean | ArgKind::Count) {
            return Err(SchemaError::FlagKindMismatch {
                name: name.to_string(),
                kind: arg.kind,
            });
        }

        if arg.positional {
            if !arg.required {
                seen_optional_positional = true;
            } else if seen_optional_positional {
                return Err(SchemaError::RequiredAfterOptionalPositional(
                    name.to_string(),
                ));
            }
        }

        let default = match &arg.default {
            Some(raw) if !arg.allows(raw) => {
                return Err(SchemaError::DefaultNotInChoices {
                    name: name.to_string(),
                    default: raw.clone(),
                });
            }
            Some(raw) => Some(coerce(arg.kind, raw).map_err(|source| {
                SchemaError::InvalidDefault {
                    name: name.to_string(),
                    source,
                }
            })?),
            None => None,
        };
        trace!(arg = name, ?default, "descriptor validated");
        defaults.push(default);
    }

    Ok(defaults)
}
