//! Validated program schema.

use tracing::debug;

use crate::derive::{FieldDefault, FieldType, derive_field_default, derive_field_type};
use crate::{ArgDescriptor, ParseOptions, SchemaError, validate_descriptors};

/// A validated, immutable program interface.
///
/// The only way to obtain a `Schema` is [`Schema::new`], which runs every
/// validation rule, so holding one is proof that the descriptors are sound.
/// Parsing borrows the schema immutably; one schema can serve any number of
/// concurrent parses.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = Schema::new(
///     "tool",
///     "Copies things.",
///     vec![
///         ArgDescriptor::positional("input", ArgKind::String),
///         ArgDescriptor::option("output", ArgKind::String).with_short('o'),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(schema.name(), "tool");
/// assert_eq!(schema.args().len(), 2);
/// assert!(schema.find_short('o').is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    description: String,
    args: Vec<ArgDescriptor>,
    fields: Vec<(FieldType, FieldDefault)>,
    options: ParseOptions,
}

impl Schema {
    /// Validates `args` and builds a schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in `args`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        args: Vec<ArgDescriptor>,
    ) -> Result<Self, SchemaError> {
        let defaults = validate_descriptors(&args)?;
        let fields = args
            .iter()
            .zip(&defaults)
            .map(|(arg, default)| {
                (
                    derive_field_type(arg),
                    derive_field_default(arg, default.as_ref()),
                )
            })
            .collect();
        let name = name.into();
        debug!(program = %name, args = args.len(), "schema validated");
        Ok(Self {
            name,
            description: description.into(),
            args,
            fields,
            options: ParseOptions::default(),
        })
    }

    /// Replaces the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Program name used in usage output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text program description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Descriptors in declaration order.
    pub fn args(&self) -> &[ArgDescriptor] {
        &self.args
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Derived field type of the descriptor at `index`.
    pub fn field_type(&self, index: usize) -> FieldType {
        self.fields[index].0
    }

    /// Derived initial value of the descriptor at `index`.
    pub fn field_default(&self, index: usize) -> &FieldDefault {
        &self.fields[index].1
    }

    /// Field names paired with their derived types, in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::*;
    ///
    /// let schema = Schema::new("t", "", vec![ArgDescriptor::count("verbose")]).unwrap();
    /// let types = schema.field_types();
    /// assert_eq!(types[0].0, "verbose");
    /// assert_eq!(types[0].1.rust_type(), "u64");
    /// ```
    pub fn field_types(&self) -> Vec<(&str, FieldType)> {
        self.args
            .iter()
            .zip(&self.fields)
            .map(|(arg, (ty, _))| (arg.name.as_str(), *ty))
            .collect()
    }

    /// Index of the non-positional descriptor spelled `--name`.
    pub fn find_long(&self, name: &str) -> Option<usize> {
        self.args
            .iter()
            .position(|arg| !arg.positional && arg.name == name)
    }

    /// Index of the non-positional descriptor bound to `-short`.
    pub fn find_short(&self, short: char) -> Option<usize> {
        self.args
            .iter()
            .position(|arg| !arg.positional && arg.short == Some(short))
    }

    /// Indices of positional descriptors in declaration order.
    pub fn positional_indices(&self) -> Vec<usize> {
        self.args
            .iter()
            .enumerate()
            .filter(|(_, arg)| arg.positional)
            .map(|(index, _)| index)
            .collect()
    }
}
