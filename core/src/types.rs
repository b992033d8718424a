//! Argument descriptor definitions.
//!
//! An [`ArgDescriptor`] describes one declared argument of a program: how it
//! is spelled on the command line, what kind of value it carries, and whether
//! it must be present. A program's interface is the ordered list of
//! descriptors handed to [`Schema::new`](crate::Schema::new); the order is
//! significant for positional matching and for help output.
//!
//! Descriptors are plain serde types so they can be authored in JSON or YAML
//! documents as well as in code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of value an argument carries.
///
/// # Examples
///
/// ```
/// use argschema_core::ArgKind;
///
/// assert_eq!(ArgKind::default(), ArgKind::String);
/// assert_eq!(ArgKind::Count.as_str(), "count");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Free text (the default).
    #[default]
    String,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// `true`/`false` value, or a presence flag.
    Boolean,
    /// Occurrence counter (`-vvv`).
    Count,
}

impl ArgKind {
    /// Lowercase name used in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ArgKind::String => "string",
            ArgKind::Int => "int",
            ArgKind::Float => "float",
            ArgKind::Boolean => "boolean",
            ArgKind::Count => "count",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema entry for a single declared argument.
///
/// Use the constructors [`option`](ArgDescriptor::option),
/// [`flag`](ArgDescriptor::flag), [`count`](ArgDescriptor::count) and
/// [`positional`](ArgDescriptor::positional), then chain builder methods
/// such as [`with_short`](ArgDescriptor::with_short).
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgDescriptor, ArgKind};
///
/// let output = ArgDescriptor::option("output", ArgKind::String)
///     .with_short('o')
///     .with_help("Output file");
/// assert!(output.takes_value());
/// assert_eq!(output.long_flag(), "--output");
/// assert_eq!(output.value_label(), "OUTPUT");
///
/// let verbose = ArgDescriptor::flag("verbose").with_short('v');
/// assert!(!verbose.takes_value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgDescriptor {
    /// Identifier, result field name and long-option spelling.
    pub name: String,
    /// Single-character short binding (`-o`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Display text for help output.
    #[serde(default)]
    pub help: String,
    /// Kind of value carried.
    #[serde(default)]
    pub kind: ArgKind,
    /// Must be explicitly set on every invocation.
    #[serde(default)]
    pub required: bool,
    /// Matched by position among bare tokens instead of by name.
    #[serde(default)]
    pub positional: bool,
    /// Literal default, coerced to `kind` when the schema is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Consumes no adjacent value.
    #[serde(default)]
    pub flag: bool,
    /// Collect repeated values. Always rejected by validation.
    #[serde(default)]
    pub multi: bool,
    /// Allowed literal values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Placeholder label override for help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,
}

impl ArgDescriptor {
    fn base(name: &str, kind: ArgKind) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            help: String::new(),
            kind,
            required: false,
            positional: false,
            default: None,
            flag: false,
            multi: false,
            choices: None,
            metavar: None,
        }
    }

    /// Creates an optional, value-consuming option (`--name <VALUE>`).
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{ArgDescriptor, ArgKind};
    ///
    /// let repeat = ArgDescriptor::option("repeat", ArgKind::Int).with_default("1");
    /// assert!(!repeat.required);
    /// assert_eq!(repeat.default.as_deref(), Some("1"));
    /// ```
    pub fn option(name: &str, kind: ArgKind) -> Self {
        Self::base(name, kind)
    }

    /// Creates a boolean presence flag (`--verbose`).
    pub fn flag(name: &str) -> Self {
        Self {
            flag: true,
            ..Self::base(name, ArgKind::Boolean)
        }
    }

    /// Creates a counting flag; each occurrence adds one.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{ArgDescriptor, ArgKind};
    ///
    /// let verbosity = ArgDescriptor::count("verbosity").with_short('v');
    /// assert_eq!(verbosity.kind, ArgKind::Count);
    /// assert!(verbosity.flag);
    /// ```
    pub fn count(name: &str) -> Self {
        Self {
            flag: true,
            ..Self::base(name, ArgKind::Count)
        }
    }

    /// Creates a required positional argument.
    pub fn positional(name: &str, kind: ArgKind) -> Self {
        Self {
            positional: true,
            required: true,
            ..Self::base(name, kind)
        }
    }

    /// Sets the short binding.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the literal default value.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// Restricts values to the given literals.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the value placeholder shown in help output.
    pub fn with_metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    /// Requests multi-value collection. Schemas containing such a descriptor
    /// fail validation with [`SchemaError::MultiValueUnsupported`](crate::SchemaError::MultiValueUnsupported).
    pub fn allow_multiple(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Returns `true` when the argument consumes an adjacent value.
    ///
    /// Flags and counters never do.
    pub fn takes_value(&self) -> bool {
        !(self.flag || self.kind == ArgKind::Count)
    }

    /// Long-option spelling (`--name`).
    pub fn long_flag(&self) -> String {
        format!("--{}", self.name)
    }

    /// Value placeholder label: the metavar override, or the name
    /// upper-cased with `-` mapped to `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{ArgDescriptor, ArgKind};
    ///
    /// let arg = ArgDescriptor::option("dry-run", ArgKind::Boolean);
    /// assert_eq!(arg.value_label(), "DRY_RUN");
    /// assert_eq!(arg.with_metavar("BOOL").value_label(), "BOOL");
    /// ```
    pub fn value_label(&self) -> String {
        match &self.metavar {
            Some(metavar) => metavar.clone(),
            None => self.name.to_uppercase().replace('-', "_"),
        }
    }

    /// Identifier-safe form of the name (`-` mapped to `_`).
    pub fn field_ident(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Returns `true` if `value` is allowed by the choice set.
    ///
    /// Descriptors without choices accept everything.
    pub fn allows(&self, value: &str) -> bool {
        match &self.choices {
            Some(choices) => choices.iter().any(|choice| choice == value),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_constructor_is_required() {
        let arg = ArgDescriptor::positional("input", ArgKind::String);
        assert!(arg.positional);
        assert!(arg.required);
        assert!(arg.takes_value());

        let arg = arg.optional();
        assert!(!arg.required);
    }

    #[test]
    fn test_count_never_takes_value() {
        let mut arg = ArgDescriptor::count("verbose");
        arg.flag = false;
        assert!(!arg.takes_value());
    }

    #[test]
    fn test_allows_checks_literal_text() {
        let arg = ArgDescriptor::option("level", ArgKind::Int).with_choices(["1", "2"]);
        assert!(arg.allows("1"));
        assert!(!arg.allows("01"));
        assert!(ArgDescriptor::option("free", ArgKind::Int).allows("01"));
    }

    #[test]
    fn test_deserialize_minimal_descriptor() {
        let arg: ArgDescriptor =
            serde_json::from_str(r#"{"name": "repeat", "short": "n", "kind": "int", "default": "1"}"#)
                .unwrap();
        assert_eq!(arg.kind, ArgKind::Int);
        assert_eq!(arg.short, Some('n'));
        assert!(!arg.required);
        assert!(!arg.flag);
        assert_eq!(arg.default.as_deref(), Some("1"));
    }
}
