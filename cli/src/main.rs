use std::fs;
use std::path::{Path, PathBuf};

use argschema_core::codegen::{default_type_name, generate_record};
use argschema_core::{ParsedArgs, Schema, render_help_as};
use argschema_loader::{load_all, load_schema};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for parsed argument records.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(about = "Validate, exercise and generate code from declarative argument schemas")]
#[command(version, disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more schema documents.
    Validate(ValidateArgs),
    /// Parse a token list against a schema and print the result record.
    Parse(ParseArgs),
    /// Print the help text a schema renders.
    Help(HelpArgs),
    /// Generate a typed Rust record for a schema.
    Codegen(CodegenArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files and/or directories containing schema documents.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema document (JSON or YAML).
    schema: PathBuf,
    /// Output format for the result record.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Program name shown if help is requested.
    #[arg(long)]
    prog: Option<String>,
    /// Tokens to parse, given after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema document (JSON or YAML).
    schema: PathBuf,
    /// Program name for the usage line.
    #[arg(long)]
    prog: Option<String>,
}

#[derive(Debug, Args)]
struct CodegenArgs {
    /// Schema document (JSON or YAML).
    schema: PathBuf,
    /// Name of the generated struct (default: derived from the schema name).
    #[arg(long)]
    type_name: Option<String>,
    /// Write the generated code to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Codegen(args) => run_codegen(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "argschema=debug,argschema_core=debug,argschema_loader=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Schema, String> {
    load_schema(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let reports = load_all(&args.inputs).map_err(|e| e.to_string())?;
    let mut failed = 0;

    for report in &reports {
        match &report.result {
            Ok(doc) => println!(
                "ok: {} ({} argument(s))",
                report.path.display(),
                doc.args.len()
            ),
            Err(err) => {
                failed += 1;
                println!("rejected: {}: {err}", report.path.display());
            }
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} schema file(s) failed validation",
            reports.len()
        ));
    }
    println!("Validated {} schema file(s).", reports.len());
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let schema = load(&args.schema)?;
    debug!(tokens = args.tokens.len(), "parsing tokens");

    let parsed = match schema.parse_args(&args.tokens) {
        Ok(parsed) => parsed,
        Err(err) if err.is_help() => {
            let prog = args.prog.as_deref().unwrap_or(schema.name());
            print!("{}", render_help_as(&schema, prog));
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    };

    println!("{}", format_record(&parsed, args.format)?);
    Ok(())
}

fn format_record(parsed: &ParsedArgs, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(parsed)
            .map_err(|err| format!("Failed to serialize record: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(parsed)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize record: {err}")),
    }
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let schema = load(&args.schema)?;
    let prog = args.prog.as_deref().unwrap_or(schema.name());
    print!("{}", render_help_as(&schema, prog));
    Ok(())
}

fn run_codegen(args: CodegenArgs) -> Result<(), String> {
    let schema = load(&args.schema)?;
    let type_name = args
        .type_name
        .unwrap_or_else(|| default_type_name(schema.name()));
    let code = generate_record(&schema, &type_name);

    match args.output {
        Some(path) => {
            fs::write(&path, code)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!("Wrote {type_name} to '{}'.", path.display());
        }
        None => print!("{code}"),
    }
    Ok(())
}
