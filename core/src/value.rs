//! Typed argument values and string coercion.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ArgKind;
use crate::derive::BaseType;

/// A coerced argument value.
///
/// Serializes untagged, so a record renders as plain JSON scalars.
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgKind, Value, coerce};
///
/// assert_eq!(coerce(ArgKind::Int, "42").unwrap(), Value::Int(42));
/// assert_eq!(coerce(ArgKind::Boolean, "yes").unwrap(), Value::Bool(true));
/// assert!(coerce(ArgKind::Int, " 42").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Count(u64),
}

impl Value {
    /// Zero value of a base type, used for slots no token filled.
    pub fn zero(base: BaseType) -> Self {
        match base {
            BaseType::Text => Value::Text(String::new()),
            BaseType::Int => Value::Int(0),
            BaseType::Float => Value::Float(0.0),
            BaseType::Bool => Value::Bool(false),
            BaseType::Count => Value::Count(0),
        }
    }

    /// Base type this value inhabits.
    pub fn base_type(&self) -> BaseType {
        match self {
            Value::Text(_) => BaseType::Text,
            Value::Int(_) => BaseType::Int,
            Value::Float(_) => BaseType::Float,
            Value::Bool(_) => BaseType::Bool,
            Value::Count(_) => BaseType::Count,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(it) => f.write_str(it),
            Value::Int(it) => write!(f, "{it}"),
            Value::Float(it) => write!(f, "{it}"),
            Value::Bool(it) => write!(f, "{it}"),
            Value::Count(it) => write!(f, "{it}"),
        }
    }
}

/// Failure to coerce a raw string to an [`ArgKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{raw}` is not a valid {kind} value")]
pub struct CoerceError {
    pub kind: ArgKind,
    pub raw: String,
}

/// Coerces `raw` to `kind`.
///
/// Numeric kinds use strict whole-token parsing: no surrounding whitespace,
/// no trailing garbage. Floats must be finite, so `NaN` and `inf` are
/// rejected. Booleans accept exactly `true`/`1`/`yes` and
/// `false`/`0`/`no`.
///
/// # Errors
///
/// Returns [`CoerceError`] when `raw` is not a valid literal for `kind`.
pub fn coerce(kind: ArgKind, raw: &str) -> Result<Value, CoerceError> {
    let err = || CoerceError {
        kind,
        raw: raw.to_string(),
    };
    match kind {
        ArgKind::String => Ok(Value::Text(raw.to_string())),
        ArgKind::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| err()),
        ArgKind::Float => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Value::Float)
            .ok_or_else(err),
        ArgKind::Boolean => parse_bool(raw).map(Value::Bool).ok_or_else(err),
        ArgKind::Count => raw.parse::<u64>().map(Value::Count).map_err(|_| err()),
    }
}

/// Parses a boolean literal.
///
/// # Examples
///
/// ```
/// use argschema_core::parse_bool;
///
/// assert_eq!(parse_bool("1"), Some(true));
/// assert_eq!(parse_bool("no"), Some(false));
/// assert_eq!(parse_bool("TRUE"), None);
/// ```
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
