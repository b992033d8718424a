//! Parse error types.
//!
//! Parse errors describe a bad command line. They are distinct from
//! [`SchemaError`](crate::SchemaError), which describes a bad schema and can
//! only happen while building one.

use thiserror::Error;

use crate::RecordError;

/// Errors produced while matching tokens against a schema.
///
/// The first error aborts the scan; no partial record is returned.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = Schema::new("tool", "", vec![ArgDescriptor::flag("verbose")]).unwrap();
///
/// let err = schema.parse(["tool", "--quiet"]).unwrap_err();
/// assert_eq!(err, ParseError::UnknownOption("--quiet".into()));
/// assert_eq!(err.exit_code(), 2);
///
/// let help = schema.parse(["tool", "-h"]).unwrap_err();
/// assert!(help.is_help());
/// assert_eq!(help.exit_code(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `--help` or `-h` was given.
    #[error("help requested")]
    HelpRequested,
    /// Option spelling not declared by the schema.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// Value-consuming option with nothing after it.
    #[error("missing value for {0}")]
    MissingValue(String),
    /// Required argument never set.
    #[error("missing required argument: {0}")]
    MissingRequired(String),
    /// Value does not coerce to the argument's kind.
    #[error("invalid value `{value}` for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
    /// Value outside the argument's choice set.
    #[error("invalid value `{value}` for {name}, expected one of: {}", .choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },
    /// Bare token with no positional slot left to fill.
    #[error("unexpected positional argument: {0}")]
    UnexpectedPositional(String),
}

impl ParseError {
    /// Returns `true` for [`ParseError::HelpRequested`].
    pub fn is_help(&self) -> bool {
        matches!(self, ParseError::HelpRequested)
    }

    /// Conventional process exit code: `0` for a help request, `2` for a
    /// usage error.
    pub fn exit_code(&self) -> i32 {
        if self.is_help() { 0 } else { 2 }
    }
}

/// Errors from [`Schema::parse_into`](crate::Schema::parse_into).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypedParseError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
