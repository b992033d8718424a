//! Plain-text help rendering.
//!
//! Reads a validated [`Schema`] and lays out usage, description, positional
//! and option sections. Output is deterministic and uncolored; callers decide
//! where to print it, typically after [`ParseError::HelpRequested`](crate::ParseError::HelpRequested).

use std::fmt::Write;

use crate::{ArgDescriptor, Schema};

const HELP_ENTRY: (&str, &str) = ("-h, --help", "Print help");

/// Renders the full help text using the schema's own program name.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = Schema::new(
///     "tool",
///     "Processes a file.",
///     vec![
///         ArgDescriptor::positional("input", ArgKind::String).with_help("Input file"),
///         ArgDescriptor::flag("verbose").with_short('v').with_help("Verbose output"),
///     ],
/// )
/// .unwrap();
///
/// let help = render_help(&schema);
/// assert!(help.starts_with("Usage: tool [--verbose] <input>\n"));
/// assert!(help.contains("Positional arguments:\n  input  Input file\n"));
/// assert!(help.contains("  -v, --verbose  Verbose output\n"));
/// ```
pub fn render_help(schema: &Schema) -> String {
    render_help_as(schema, schema.name())
}

/// Renders the full help text with `program` in the usage line.
pub fn render_help_as(schema: &Schema, program: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(buf, "{}", usage_line_as(schema, program));
    if !schema.description().trim().is_empty() {
        let _ = writeln!(buf);
        let _ = writeln!(buf, "{}", schema.description().trim_end());
    }

    let positionals: Vec<&ArgDescriptor> =
        schema.args().iter().filter(|arg| arg.positional).collect();
    if !positionals.is_empty() {
        let rows = positionals
            .iter()
            .map(|arg| (positional_name(arg).to_string(), describe(arg)))
            .collect::<Vec<_>>();
        let _ = writeln!(buf);
        let _ = writeln!(buf, "Positional arguments:");
        write_rows(&mut buf, &rows);
    }

    let mut rows = vec![(HELP_ENTRY.0.to_string(), HELP_ENTRY.1.to_string())];
    rows.extend(
        schema
            .args()
            .iter()
            .filter(|arg| !arg.positional)
            .map(|arg| (option_label(arg), describe(arg))),
    );
    let _ = writeln!(buf);
    let _ = writeln!(buf, "Options:");
    write_rows(&mut buf, &rows);

    buf
}

/// Usage line with the schema's own program name.
///
/// Required options come first, then bracketed optional options, then
/// positionals in declaration order.
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
///         ArgDescriptor::flag("verbose").with_short('v'),
///         ArgDescriptor::option("repeat", ArgKind::Int).with_short('n').with_default("1"),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(
///     usage_line(&schema),
///     "Usage: tool [--output <OUTPUT>] [--verbose] [--repeat <REPEAT>] <input>"
/// );
/// ```
pub fn usage_line(schema: &Schema) -> String {
    usage_line_as(schema, schema.name())
}

/// Usage line with `program` as the invoked name.
pub fn usage_line_as(schema: &Schema, program: &str) -> String {
    let mut parts = vec![format!("Usage: {program}")];

    let options = || schema.args().iter().filter(|arg| !arg.positional);
    parts.extend(options().filter(|arg| arg.required).map(usage_option));
    parts.extend(
        options()
            .filter(|arg| !arg.required)
            .map(|arg| format!("[{}]", usage_option(arg))),
    );
    parts.extend(
        schema
            .args()
            .iter()
            .filter(|arg| arg.positional)
            .map(|arg| {
                let label = format!("<{}>", positional_name(arg));
                if arg.required { label } else { format!("[{label}]") }
            }),
    );

    parts.join(" ")
}

fn usage_option(arg: &ArgDescriptor) -> String {
    if arg.takes_value() {
        format!("{} <{}>", arg.long_flag(), arg.value_label())
    } else {
        arg.long_flag()
    }
}

fn positional_name(arg: &ArgDescriptor) -> &str {
    arg.metavar.as_deref().unwrap_or(&arg.name)
}

fn option_label(arg: &ArgDescriptor) -> String {
    let mut label = match arg.short {
        Some(short) => format!("-{short}, {}", arg.long_flag()),
        None => format!("    {}", arg.long_flag()),
    };
    if arg.takes_value() {
        let _ = write!(label, " <{}>", arg.value_label());
    }
    label
}

fn describe(arg: &ArgDescriptor) -> String {
    let mut text = arg.help.clone();
    let mut push = |part: String| {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&part);
    };
    if arg.required && !arg.positional {
        push("(required)".to_string());
    }
    if let Some(default) = &arg.default {
        push(format!("[default: {default}]"));
    }
    if let Some(choices) = &arg.choices {
        push(format!("[choices: {}]", choices.join(", ")));
    }
    text
}

fn write_rows(buf: &mut String, rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, text) in rows {
        if text.is_empty() {
            let _ = writeln!(buf, "  {label}");
        } else {
            let _ = writeln!(buf, "  {label:<width$}  {text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgKind;

    fn schema() -> Schema {
        Schema::new(
            "tool",
            "Processes a file.",
            vec![
                ArgDescriptor::positional("input", ArgKind::String).with_help("Input file"),
                ArgDescriptor::positional("mode", ArgKind::String)
                    .optional()
                    .with_default("fast")
                    .with_choices(["fast", "slow"])
                    .with_help("Mode"),
                ArgDescriptor::option("output", ArgKind::String)
                    .with_short('o')
                    .with_help("Output file"),
                ArgDescriptor::option("level", ArgKind::Int)
                    .required()
                    .with_metavar("N")
                    .with_help("Level"),
                ArgDescriptor::count("verbose").with_short('v'),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_usage_orders_required_options_first() {
        assert_eq!(
            usage_line(&schema()),
            "Usage: tool --level <N> [--output <OUTPUT>] [--verbose] <input> [<mode>]"
        );
        assert!(usage_line_as(&schema(), "./bin").starts_with("Usage: ./bin --level"));
    }

    #[test]
    fn test_full_layout() {
        let expected = "\
Usage: tool --level <N> [--output <OUTPUT>] [--verbose] <input> [<mode>]

Processes a file.

Positional arguments:
  input  Input file
  mode   Mode [default: fast] [choices: fast, slow]

Options:
  -h, --help             Print help
  -o, --output <OUTPUT>  Output file
      --level <N>        Level (required)
  -v, --verbose
";
        assert_eq!(render_help(&schema()), expected);
    }

    #[test]
    fn test_no_positional_section_without_positionals() {
        let schema = Schema::new("t", "", vec![ArgDescriptor::flag("quiet")]).unwrap();
        let help = render_help(&schema);
        assert!(!help.contains("Positional arguments"));
        assert_eq!(
            help,
            "Usage: t [--quiet]\n\nOptions:\n  -h, --help   Print help\n      --quiet\n"
        );
    }
}
