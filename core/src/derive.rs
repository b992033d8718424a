//! Result field type derivation.
//!
//! Every descriptor maps to exactly one field type, decided by the first
//! matching rule:
//!
//! 1. `kind = count` → unsigned integer, never nullable, default zero.
//! 2. `flag = true` → boolean, never nullable, default `false`.
//! 3. Otherwise the base type follows `kind`.
//! 4. Required or positional descriptors get the bare base type.
//! 5. Everything else is nullable, absent unless a literal default exists.
//!
//! Multi-value descriptors never reach this point; validation rejects them.

use serde::Serialize;

use crate::{ArgDescriptor, ArgKind, Value};

/// Semantic type of a result field, ignoring nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Text,
    Int,
    Float,
    Bool,
    Count,
}

impl BaseType {
    /// Rust spelling of the base type.
    pub fn rust_type(self) -> &'static str {
        match self {
            BaseType::Text => "String",
            BaseType::Int => "i64",
            BaseType::Float => "f64",
            BaseType::Bool => "bool",
            BaseType::Count => "u64",
        }
    }
}

/// Derived type of one result field.
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgDescriptor, ArgKind, BaseType, FieldType, derive_field_type};
///
/// let output = ArgDescriptor::option("output", ArgKind::String);
/// assert_eq!(
///     derive_field_type(&output),
///     FieldType { base: BaseType::Text, nullable: true }
/// );
/// assert_eq!(derive_field_type(&output).rust_type(), "Option<String>");
///
/// let verbose = ArgDescriptor::count("verbose");
/// assert_eq!(derive_field_type(&verbose).rust_type(), "u64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldType {
    pub base: BaseType,
    pub nullable: bool,
}

impl FieldType {
    /// Rust spelling, `Option<..>` wrapped when nullable.
    pub fn rust_type(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.base.rust_type())
        } else {
            self.base.rust_type().to_string()
        }
    }
}

/// Initial value of a field before any token is read.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    /// The base type's zero value.
    Zero,
    /// Absent (`None`) in a nullable field.
    Absent,
    /// A coerced literal default.
    Value(Value),
}

/// Maps a descriptor to the type its result field must have.
pub fn derive_field_type(arg: &ArgDescriptor) -> FieldType {
    if arg.kind == ArgKind::Count {
        return FieldType {
            base: BaseType::Count,
            nullable: false,
        };
    }
    if arg.flag {
        return FieldType {
            base: BaseType::Bool,
            nullable: false,
        };
    }
    FieldType {
        base: base_type(arg.kind),
        nullable: !(arg.required || arg.positional),
    }
}

/// Maps a descriptor and its coerced literal default to the field's
/// initial value.
///
/// Counters and flags always start at zero/`false`; a literal default on
/// them is validated but does not change the starting value.
pub fn derive_field_default(arg: &ArgDescriptor, default: Option<&Value>) -> FieldDefault {
    let ty = derive_field_type(arg);
    if ty.base == BaseType::Count || arg.flag {
        return FieldDefault::Zero;
    }
    match default {
        Some(value) => FieldDefault::Value(value.clone()),
        None if ty.nullable => FieldDefault::Absent,
        None => FieldDefault::Zero,
    }
}

pub(crate) fn base_type(kind: ArgKind) -> BaseType {
    match kind {
        ArgKind::String => BaseType::Text,
        ArgKind::Int => BaseType::Int,
        ArgKind::Float => BaseType::Float,
        ArgKind::Boolean => BaseType::Bool,
        ArgKind::Count => BaseType::Count,
    }
}
