//! Token matching engine.
//!
//! A single left-to-right pass over the tokens with one token of lookahead
//! for value-consuming options:
//!
//! - `--help` / `-h` stop immediately with [`ParseError::HelpRequested`].
//! - `--` switches to positional-only mode for the rest of the tokens.
//! - `--name=value` and `--name [value]` are long options.
//! - `-abc` is a short cluster: leading flag characters accumulate and the
//!   first value-consuming character claims the rest of the token, or the
//!   next token when nothing is left.
//! - Anything else, including `-` and negative numbers such as `-5`, fills
//!   the next positional slot.
//!
//! Required arguments are checked once, after the whole pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::derive::FieldDefault;
use crate::{
    ArgKind, FromParsedArgs, ParseError, ParsedArgs, Schema, TypedParseError, Value, coerce,
};

/// Engine knobs carried by a [`Schema`].
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let schema = Schema::new("tool", "", vec![ArgDescriptor::flag("verbose")]).unwrap();
/// // `--flag=value` is assigned like any other value by default.
/// let args = schema.parse(["tool", "--verbose=no"]).unwrap();
/// assert_eq!(args.get::<bool>("verbose").unwrap(), false);
///
/// let strict = schema.with_options(ParseOptions { reject_inline_flag_values: true });
/// assert!(matches!(
///     strict.parse(["tool", "--verbose=no"]),
///     Err(ParseError::InvalidValue { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Reject `--name=value` when `name` is a flag or counter instead of
    /// assigning the value.
    pub reject_inline_flag_values: bool,
}

impl Schema {
    /// Parses a full argument vector whose first element is the program
    /// name. The program name is discarded.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse<I, S>(&self, tokens: I) -> Result<ParsedArgs, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = tokens.into_iter();
        let _program = tokens.next();
        self.parse_args(tokens)
    }

    /// Parses tokens that do not include a program name.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_args<I, S>(&self, tokens: I) -> Result<ParsedArgs, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = tokens.into_iter().map(|it| it.as_ref().to_string());
        Matcher::new(self).run(&mut tokens)
    }

    /// Parses the current process arguments.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_from_env(&self) -> Result<ParsedArgs, ParseError> {
        self.parse(std::env::args_os().map(|it| it.to_string_lossy().into_owned()))
    }

    /// Parses a full argument vector straight into a typed record.
    ///
    /// # Errors
    ///
    /// Returns [`TypedParseError::Parse`] for command-line errors and
    /// [`TypedParseError::Record`] when `T` does not match the schema.
    pub fn parse_into<T, I, S>(&self, tokens: I) -> Result<T, TypedParseError>
    where
        T: FromParsedArgs,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args = self.parse(tokens)?;
        Ok(T::from_parsed(&args)?)
    }
}

struct Matcher<'s> {
    schema: &'s Schema,
    values: Vec<Option<Value>>,
    explicit: Vec<bool>,
    positionals: Vec<usize>,
    next_positional: usize,
}

impl<'s> Matcher<'s> {
    fn new(schema: &'s Schema) -> Self {
        let values = (0..schema.args().len())
            .map(|index| match schema.field_default(index) {
                FieldDefault::Zero => Some(Value::zero(schema.field_type(index).base)),
                FieldDefault::Absent => None,
                FieldDefault::Value(value) => Some(value.clone()),
            })
            .collect();
        Self {
            schema,
            values,
            explicit: vec![false; schema.args().len()],
            positionals: schema.positional_indices(),
            next_positional: 0,
        }
    }

    fn run(mut self, tokens: &mut impl Iterator<Item = String>) -> Result<ParsedArgs, ParseError> {
        let mut positional_only = false;

        while let Some(token) = tokens.next() {
            if positional_only {
                self.positional(&token)?;
                continue;
            }
            match token.as_str() {
                "--help" | "-h" => {
                    trace!("help requested");
                    return Err(ParseError::HelpRequested);
                }
                "--" => {
                    trace!("positional-only mode");
                    positional_only = true;
                    continue;
                }
                _ => {}
            }

            if let Some(body) = token.strip_prefix("--") {
                self.long(&token, body, tokens)?;
            } else if is_short_cluster(&token) {
                self.short_cluster(&token[1..], tokens)?;
            } else {
                self.positional(&token)?;
            }
        }

        self.finish()
    }

    fn long(
        &mut self,
        token: &str,
        body: &str,
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<(), ParseError> {
        if let Some((name, value)) = body.split_once('=') {
            let index = self
                .schema
                .find_long(name)
                .ok_or_else(|| ParseError::UnknownOption(format!("--{name}")))?;
            let arg = &self.schema.args()[index];
            if !arg.takes_value() && self.schema.options().reject_inline_flag_values {
                return Err(ParseError::InvalidValue {
                    name: arg.name.clone(),
                    value: value.to_string(),
                    reason: "flag takes no value".to_string(),
                });
            }
            trace!(option = name, value, "long option with inline value");
            return self.assign(index, value);
        }

        let index = self
            .schema
            .find_long(body)
            .ok_or_else(|| ParseError::UnknownOption(token.to_string()))?;
        if !self.schema.args()[index].takes_value() {
            trace!(option = body, "long flag");
            self.apply_flag(index);
            return Ok(());
        }
        let value = tokens
            .next()
            .ok_or_else(|| ParseError::MissingValue(token.to_string()))?;
        trace!(option = body, %value, "long option");
        self.assign(index, &value)
    }

    fn short_cluster(
        &mut self,
        cluster: &str,
        tokens: &mut impl Iterator<Item = String>,
    ) -> Result<(), ParseError> {
        for (offset, short) in cluster.char_indices() {
            let index = self
                .schema
                .find_short(short)
                .ok_or_else(|| ParseError::UnknownOption(format!("-{short}")))?;
            if !self.schema.args()[index].takes_value() {
                trace!(%short, "short flag");
                self.apply_flag(index);
                continue;
            }

            let rest = &cluster[offset + short.len_utf8()..];
            if !rest.is_empty() {
                trace!(%short, value = rest, "short option with attached value");
                return self.assign(index, rest);
            }
            let value = tokens
                .next()
                .ok_or_else(|| ParseError::MissingValue(format!("-{short}")))?;
            trace!(%short, %value, "short option");
            return self.assign(index, &value);
        }
        Ok(())
    }

    fn positional(&mut self, token: &str) -> Result<(), ParseError> {
        let Some(&index) = self.positionals.get(self.next_positional) else {
            return Err(ParseError::UnexpectedPositional(token.to_string()));
        };
        self.next_positional += 1;
        trace!(arg = %self.schema.args()[index].name, value = token, "positional");
        self.assign(index, token)
    }

    /// Choice membership is checked on the raw text, before coercion.
    fn assign(&mut self, index: usize, raw: &str) -> Result<(), ParseError> {
        let arg = &self.schema.args()[index];
        if !arg.allows(raw) {
            return Err(ParseError::InvalidChoice {
                name: arg.name.clone(),
                value: raw.to_string(),
                choices: arg.choices.clone().unwrap_or_default(),
            });
        }
        let value = coerce(arg.kind, raw).map_err(|err| ParseError::InvalidValue {
            name: arg.name.clone(),
            value: raw.to_string(),
            reason: format!("expected {}", err.kind),
        })?;
        self.values[index] = Some(value);
        self.explicit[index] = true;
        Ok(())
    }

    fn apply_flag(&mut self, index: usize) {
        let kind = self.schema.args()[index].kind;
        let slot = &mut self.values[index];
        *slot = Some(match (kind, slot.take()) {
            (ArgKind::Count, Some(Value::Count(n))) => Value::Count(n.saturating_add(1)),
            (ArgKind::Count, _) => Value::Count(1),
            _ => Value::Bool(true),
        });
        self.explicit[index] = true;
    }

    fn finish(self) -> Result<ParsedArgs, ParseError> {
        let args = self.schema.args();
        if let Some(missing) = args
            .iter()
            .zip(&self.explicit)
            .find(|(arg, explicit)| arg.required && !**explicit)
            .map(|(arg, _)| arg)
        {
            return Err(ParseError::MissingRequired(missing.name.clone()));
        }

        let fields = args
            .iter()
            .map(|arg| arg.name.clone())
            .zip(self.values)
            .collect();
        debug!(program = %self.schema.name(), "parse succeeded");
        Ok(ParsedArgs::new(fields))
    }
}

fn is_short_cluster(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && matches!(chars.next(), Some(second) if !second.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgDescriptor, ParseError};

    fn tool() -> Schema {
        Schema::new(
            "tool",
            "Processes a file.",
            vec![
                ArgDescriptor::positional("input", ArgKind::String).with_help("Input file"),
                ArgDescriptor::option("output", ArgKind::String)
                    .with_short('o')
                    .with_help("Output file"),
                ArgDescriptor::flag("verbose")
                    .with_short('v')
                    .with_help("Verbose output"),
                ArgDescriptor::option("repeat", ArgKind::Int)
                    .with_short('n')
                    .with_default("1")
                    .with_help("Repeat count"),
            ],
        )
        .unwrap()
    }

    fn counter() -> Schema {
        Schema::new(
            "counter",
            "",
            vec![
                ArgDescriptor::count("verbose").with_short('v'),
                ArgDescriptor::option("output", ArgKind::String).with_short('o'),
                ArgDescriptor::option("level", ArgKind::Int)
                    .with_short('l')
                    .with_choices(["1", "2", "3"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_short_cluster_detection() {
        assert!(is_short_cluster("-v"));
        assert!(is_short_cluster("-vvv"));
        assert!(!is_short_cluster("-"));
        assert!(!is_short_cluster("-5"));
        assert!(!is_short_cluster("plain"));
    }

    #[test]
    fn test_minimal_invocation_uses_defaults() {
        let args = tool().parse(["tool", "hello.txt"]).unwrap();
        assert_eq!(args.get::<String>("input").unwrap(), "hello.txt");
        assert_eq!(args.get::<Option<String>>("output").unwrap(), None);
        assert!(!args.get::<bool>("verbose").unwrap());
        assert_eq!(args.get::<Option<i64>>("repeat").unwrap(), Some(1));
    }

    #[test]
    fn test_missing_required_positional() {
        assert_eq!(
            tool().parse(["tool"]),
            Err(ParseError::MissingRequired("input".to_string()))
        );
    }

    #[test]
    fn test_long_option_inline_and_separate() {
        let args = tool()
            .parse(["tool", "--output=out.txt", "in.txt"])
            .unwrap();
        assert_eq!(args.get::<Option<String>>("output").unwrap(), Some("out.txt".into()));
        assert_eq!(args.get::<String>("input").unwrap(), "in.txt");

        let args = tool().parse(["tool", "--output", "out.txt", "in.txt"]).unwrap();
        assert_eq!(args.get::<Option<String>>("output").unwrap(), Some("out.txt".into()));

        let args = tool().parse(["tool", "--output=", "in.txt"]).unwrap();
        assert_eq!(args.get::<Option<String>>("output").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_long_option_consumes_next_token_verbatim() {
        let args = tool().parse(["tool", "--output", "--verbose", "in.txt"]).unwrap();
        assert_eq!(
            args.get::<Option<String>>("output").unwrap(),
            Some("--verbose".into())
        );
        assert!(!args.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn test_cluster_flag_then_value_from_next_token() {
        let args = tool().parse(["tool", "-vn", "3", "in.txt"]).unwrap();
        assert!(args.get::<bool>("verbose").unwrap());
        assert_eq!(args.get::<Option<i64>>("repeat").unwrap(), Some(3));
        assert_eq!(args.get::<Option<String>>("output").unwrap(), None);
        assert_eq!(args.get::<String>("input").unwrap(), "in.txt");
    }

    #[test]
    fn test_cluster_value_claims_rest_of_token() {
        let args = tool().parse(["tool", "-voout.txt", "in.txt"]).unwrap();
        assert!(args.get::<bool>("verbose").unwrap());
        assert_eq!(args.get::<Option<String>>("output").unwrap(), Some("out.txt".into()));

        let args = tool().parse(["tool", "-n7", "in.txt"]).unwrap();
        assert_eq!(args.get::<Option<i64>>("repeat").unwrap(), Some(7));
    }

    #[test]
    fn test_double_dash_makes_everything_positional() {
        let args = tool().parse(["tool", "--", "--not-a-flag"]).unwrap();
        assert_eq!(args.get::<String>("input").unwrap(), "--not-a-flag");

        let args = tool().parse(["tool", "--", "-h"]).unwrap();
        assert_eq!(args.get::<String>("input").unwrap(), "-h");

        assert_eq!(
            tool().parse(["tool", "--", "a", "--"]),
            Err(ParseError::UnexpectedPositional("--".to_string()))
        );
    }

    #[test]
    fn test_invalid_int_value() {
        assert_eq!(
            tool().parse(["tool", "-n", "abc", "in.txt"]),
            Err(ParseError::InvalidValue {
                name: "repeat".to_string(),
                value: "abc".to_string(),
                reason: "expected int".to_string(),
            })
        );
    }

    #[test]
    fn test_help_wins_anywhere_before_double_dash() {
        assert_eq!(tool().parse(["tool", "-h"]), Err(ParseError::HelpRequested));
        assert_eq!(
            tool().parse(["tool", "--bogus", "--help"]),
            Err(ParseError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            tool().parse(["tool", "in.txt", "--help", "--bogus"]),
            Err(ParseError::HelpRequested)
        );
        // help short-circuits the required check
        assert_eq!(tool().parse(["tool", "--help"]), Err(ParseError::HelpRequested));
    }

    #[test]
    fn test_unknown_options() {
        assert_eq!(
            tool().parse(["tool", "--bogus", "in.txt"]),
            Err(ParseError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            tool().parse(["tool", "--bogus=1", "in.txt"]),
            Err(ParseError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            tool().parse(["tool", "-vx", "in.txt"]),
            Err(ParseError::UnknownOption("-x".to_string()))
        );
        // positionals have no long spelling
        assert_eq!(
            tool().parse(["tool", "--input", "in.txt"]),
            Err(ParseError::UnknownOption("--input".to_string()))
        );
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(
            tool().parse(["tool", "in.txt", "--output"]),
            Err(ParseError::MissingValue("--output".to_string()))
        );
        assert_eq!(
            tool().parse(["tool", "in.txt", "-vo"]),
            Err(ParseError::MissingValue("-o".to_string()))
        );
    }

    #[test]
    fn test_unexpected_positional() {
        assert_eq!(
            tool().parse(["tool", "a", "b"]),
            Err(ParseError::UnexpectedPositional("b".to_string()))
        );
    }

    #[test]
    fn test_negative_number_and_dash_are_positional() {
        let schema = Schema::new(
            "calc",
            "",
            vec![
                ArgDescriptor::positional("x", ArgKind::Int),
                ArgDescriptor::positional("file", ArgKind::String),
            ],
        )
        .unwrap();
        let args = schema.parse(["calc", "-5", "-"]).unwrap();
        assert_eq!(args.get::<i64>("x").unwrap(), -5);
        assert_eq!(args.get::<String>("file").unwrap(), "-");
    }

    #[test]
    fn test_count_accumulates_across_spellings() {
        let schema = counter();
        for n in 0..6u64 {
            let stacked = format!("-{}", "v".repeat(n as usize));
            let mut tokens = vec!["counter".to_string()];
            if n > 0 {
                tokens.push(stacked);
            }
            let args = schema.parse(&tokens).unwrap();
            assert_eq!(args.get::<u64>("verbose").unwrap(), n);

            let mut tokens = vec!["counter".to_string()];
            tokens.extend((0..n).map(|_| "--verbose".to_string()));
            let args = schema.parse(&tokens).unwrap();
            assert_eq!(args.get::<u64>("verbose").unwrap(), n);
        }

        let args = schema
            .parse(["counter", "-vv", "--verbose", "-v", "-vvo", "out"])
            .unwrap();
        assert_eq!(args.get::<u64>("verbose").unwrap(), 6);
        assert_eq!(args.get::<Option<String>>("output").unwrap(), Some("out".into()));
    }

    #[test]
    fn test_inline_value_on_flags_is_assigned() {
        let schema = counter();
        let args = schema.parse(["counter", "--verbose=4"]).unwrap();
        assert_eq!(args.get::<u64>("verbose").unwrap(), 4);

        let args = schema.parse(["counter", "--verbose=4", "-v"]).unwrap();
        assert_eq!(args.get::<u64>("verbose").unwrap(), 5);

        assert!(matches!(
            schema.parse(["counter", "--verbose=lots"]),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_strict_options_reject_inline_flag_values() {
        let schema = counter().with_options(ParseOptions {
            reject_inline_flag_values: true,
        });
        assert_eq!(
            schema.parse(["counter", "--verbose=4"]),
            Err(ParseError::InvalidValue {
                name: "verbose".to_string(),
                value: "4".to_string(),
                reason: "flag takes no value".to_string(),
            })
        );
        assert!(schema.parse(["counter", "--output=x"]).is_ok());
    }

    #[test]
    fn test_choice_checked_before_coercion() {
        let schema = counter();
        let args = schema.parse(["counter", "-l", "2"]).unwrap();
        assert_eq!(args.get::<Option<i64>>("level").unwrap(), Some(2));

        // a syntactically valid int outside the set
        assert_eq!(
            schema.parse(["counter", "--level", "4"]),
            Err(ParseError::InvalidChoice {
                name: "level".to_string(),
                value: "4".to_string(),
                choices: vec!["1".to_string(), "2".to_string(), "3".to_string()],
            })
        );
        // choices compare literal text
        assert!(matches!(
            schema.parse(["counter", "--level=02"]),
            Err(ParseError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_required_option_must_be_explicit_even_with_default() {
        let schema = Schema::new(
            "t",
            "",
            vec![ArgDescriptor::option("mode", ArgKind::String)
                .required()
                .with_default("fast")],
        )
        .unwrap();
        assert_eq!(
            schema.parse(["t"]),
            Err(ParseError::MissingRequired("mode".to_string()))
        );
        let args = schema.parse(["t", "--mode", "slow"]).unwrap();
        assert_eq!(args.get::<String>("mode").unwrap(), "slow");
    }

    #[test]
    fn test_optional_positionals_fill_in_order() {
        let schema = Schema::new(
            "cp",
            "",
            vec![
                ArgDescriptor::positional("source", ArgKind::String),
                ArgDescriptor::positional("dest", ArgKind::String)
                    .optional()
                    .with_default("."),
                ArgDescriptor::positional("mode", ArgKind::Int).optional(),
            ],
        )
        .unwrap();
        let args = schema.parse(["cp", "a"]).unwrap();
        assert_eq!(args.get::<String>("dest").unwrap(), ".");
        assert_eq!(args.get::<i64>("mode").unwrap(), 0);

        let args = schema.parse(["cp", "a", "b", "7"]).unwrap();
        assert_eq!(args.get::<String>("dest").unwrap(), "b");
        assert_eq!(args.get::<i64>("mode").unwrap(), 7);
    }

    #[test]
    fn test_parse_args_and_empty_vector() {
        let schema = counter();
        let args = schema.parse_args(["-vv"]).unwrap();
        assert_eq!(args.get::<u64>("verbose").unwrap(), 2);

        let empty: [&str; 0] = [];
        let args = schema.parse(empty).unwrap();
        assert_eq!(args.get::<u64>("verbose").unwrap(), 0);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let schema = tool();
        let tokens = ["tool", "-v", "--repeat=4", "in.txt", "-o", "x"];
        assert_eq!(schema.parse(tokens), schema.parse(tokens));
        assert_eq!(
            schema.parse(["tool", "-n", "x"]),
            schema.parse(["tool", "-n", "x"])
        );
    }
}
