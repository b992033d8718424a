//! Parse result record.
//!
//! [`ParsedArgs`] is the dynamic form of the result record: one field per
//! descriptor, keyed by name, in declaration order. Typed access goes through
//! [`FromValue`], and whole typed records through [`FromParsedArgs`], which
//! the code generator in [`codegen`](crate::codegen) implements for emitted
//! structs.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::Value;

/// Errors reading typed values out of a [`ParsedArgs`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No field with this name exists in the record.
    #[error("no such field: {0}")]
    UnknownField(String),
    /// The field holds a value of another type.
    #[error("field `{field}` is {found}, not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },
}

/// Result record produced by a successful parse.
///
/// Non-nullable fields always hold a value; nullable fields hold `None`
/// when absent. Two parses of the same tokens against the same schema
/// produce equal records.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = Schema::new(
///     "tool",
///     "",
///     vec![
///         ArgDescriptor::positional("input", ArgKind::String),
///         ArgDescriptor::option("output", ArgKind::String).with_short('o'),
///     ],
/// )
/// .unwrap();
///
/// let args = schema.parse(["tool", "in.txt"]).unwrap();
/// assert_eq!(args.get::<String>("input").unwrap(), "in.txt");
/// assert_eq!(args.get::<Option<String>>("output").unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedArgs {
    fields: Vec<(String, Option<Value>)>,
}

impl ParsedArgs {
    pub(crate) fn new(fields: Vec<(String, Option<Value>)>) -> Self {
        Self { fields }
    }

    /// Reads a field as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownField`] when no field is named `name`,
    /// and [`RecordError::TypeMismatch`] when the stored value is not a `T`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, RecordError> {
        let (_, slot) = self
            .fields
            .iter()
            .find(|(field, _)| field == name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        T::from_slot(slot.as_ref()).ok_or_else(|| RecordError::TypeMismatch {
            field: name.to_string(),
            expected: T::type_name(),
            found: match slot {
                Some(value) => value.base_type().rust_type().to_string(),
                None => "absent".to_string(),
            },
        })
    }

    /// Raw value of a field, `None` when absent or unknown.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, slot)| slot.as_ref())
    }

    /// Returns `true` if the field exists and holds a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(name, slot)| (name.as_str(), slot.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, slot) in &self.fields {
            map.serialize_entry(name, slot)?;
        }
        map.end()
    }
}

/// Conversion from a record slot to a Rust value.
///
/// Plain types require a present value of the matching kind; `Option<T>`
/// additionally maps an absent slot to `None`.
pub trait FromValue: Sized {
    fn from_slot(slot: Option<&Value>) -> Option<Self>;

    fn type_name() -> &'static str;
}

macro_rules! impl_from_value {
    ($ty:ty, $name:literal, $variant:ident) => {
        impl FromValue for $ty {
            fn from_slot(slot: Option<&Value>) -> Option<Self> {
                match slot {
                    Some(Value::$variant(it)) => Some(it.clone()),
                    _ => None,
                }
            }

            fn type_name() -> &'static str {
                $name
            }
        }
    };
}

impl_from_value!(String, "String", Text);
impl_from_value!(i64, "i64", Int);
impl_from_value!(f64, "f64", Float);
impl_from_value!(bool, "bool", Bool);
impl_from_value!(u64, "u64", Count);

impl<T: FromValue> FromValue for Option<T> {
    fn from_slot(slot: Option<&Value>) -> Option<Self> {
        match slot {
            None => Some(None),
            Some(_) => T::from_slot(slot).map(Some),
        }
    }

    fn type_name() -> &'static str {
        "Option"
    }
}

/// A statically typed record built from a [`ParsedArgs`].
///
/// Implementations are usually emitted by
/// [`generate_record`](crate::codegen::generate_record).
pub trait FromParsedArgs: Sized {
    fn from_parsed(args: &ParsedArgs) -> Result<Self, RecordError>;
}
