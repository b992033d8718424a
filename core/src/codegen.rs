//! Typed record generation.
//!
//! Emits Rust source for a struct with one field per descriptor, typed by
//! [`derive_field_type`](crate::derive_field_type), together with a
//! [`FromParsedArgs`](crate::FromParsedArgs) impl that reads each field out
//! of a [`ParsedArgs`](crate::ParsedArgs). The output is deterministic, so it
//! can be produced from a `build.rs` or checked in and diffed.

use std::fmt::Write;

use crate::Schema;

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Generates a typed record definition for `schema`.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
/// use argschema_core::codegen::generate_record;
///
/// let schema = Schema::new(
///     "tool",
///     "",
///     vec![
///         ArgDescriptor::positional("input", ArgKind::String),
///         ArgDescriptor::option("dry-run", ArgKind::Boolean),
///     ],
/// )
/// .unwrap();
///
/// let code = generate_record(&schema, "ToolArgs");
/// assert!(code.contains("pub struct ToolArgs {\n"));
/// assert!(code.contains("    pub input: String,\n"));
/// assert!(code.contains("    pub dry_run: Option<bool>,\n"));
/// assert!(code.contains("dry_run: args.get(\"dry-run\")?,"));
/// ```
pub fn generate_record(schema: &Schema, type_name: &str) -> String {
    let mut buf = String::new();
    let fields = schema
        .args()
        .iter()
        .zip(schema.field_types())
        .map(|(arg, (name, ty))| (rust_ident(&arg.field_ident()), name, ty))
        .collect::<Vec<_>>();

    w!(buf, "// Generated from the `{}` argument schema.\n", schema.name());
    w!(buf, "#[derive(Debug, Clone, PartialEq)]\n");
    if fields.is_empty() {
        w!(buf, "pub struct {type_name};\n");
    } else {
        w!(buf, "pub struct {type_name} {{\n");
        for (ident, _, ty) in &fields {
            w!(buf, "    pub {ident}: {},\n", ty.rust_type());
        }
        w!(buf, "}}\n");
    }
    w!(buf, "\n");

    w!(buf, "impl argschema_core::FromParsedArgs for {type_name} {{\n");
    w!(buf, "    fn from_parsed(\n");
    w!(buf, "        args: &argschema_core::ParsedArgs,\n");
    w!(buf, "    ) -> Result<Self, argschema_core::RecordError> {{\n");
    if fields.is_empty() {
        w!(buf, "        let _ = args;\n");
        w!(buf, "        Ok(Self)\n");
    } else {
        w!(buf, "        Ok(Self {{\n");
        for (ident, name, _) in &fields {
            w!(buf, "            {ident}: args.get({name:?})?,\n");
        }
        w!(buf, "        }})\n");
    }
    w!(buf, "    }}\n");
    w!(buf, "}}\n");

    buf
}

/// Default record type name for a program: `my-tool` becomes `MyToolArgs`.
pub fn default_type_name(program: &str) -> String {
    let mut name = String::new();
    for part in program.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name.push_str("Args");
    name
}

/// Rust identifier for a record field; also used to detect collisions
/// when a schema is validated.
pub(crate) fn rust_ident(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if matches!(ident.as_str(), "crate" | "self" | "super" | "Self") {
        ident.push('_');
    } else if KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}
