use std::fs;

use argschema_core::{ParseError, Value, render_help};
use argschema_loader::{LoadError, SchemaDocument, load_schema};

const TOOL_YAML: &str = r#"
name: tool
description: Processes a file.
args:
  - name: input
    positional: true
    required: true
    help: Input file
  - name: output
    short: o
    help: Output file
  - name: verbose
    short: v
    kind: boolean
    flag: true
    help: Verbose output
  - name: repeat
    short: n
    kind: int
    default: "1"
    help: Repeat count
"#;

#[test]
fn yaml_document_parses_reference_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tool.yaml");
    fs::write(&path, TOOL_YAML).unwrap();

    let schema = load_schema(&path).unwrap();
    let args = schema.parse(["prog", "-vn", "3", "in.txt"]).unwrap();
    assert_eq!(args.value("input"), Some(&Value::Text("in.txt".into())));
    assert_eq!(args.value("output"), None);
    assert_eq!(args.value("verbose"), Some(&Value::Bool(true)));
    assert_eq!(args.value("repeat"), Some(&Value::Int(3)));

    assert_eq!(
        schema.parse(["prog"]),
        Err(ParseError::MissingRequired("input".into()))
    );
    assert!(render_help(&schema).starts_with("Usage: tool [--output <OUTPUT>]"));
}

#[test]
fn json_and_yaml_describe_the_same_schema() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_path = dir.path().join("tool.yml");
    let json_path = dir.path().join("tool.json");
    fs::write(&yaml_path, TOOL_YAML).unwrap();

    let doc = SchemaDocument::load(&yaml_path).unwrap();
    doc.save(&json_path).unwrap();

    let reloaded = SchemaDocument::load(&json_path).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn extensionless_file_is_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toolschema");
    fs::write(&path, TOOL_YAML).unwrap();
    assert_eq!(load_schema(&path).unwrap().name(), "tool");

    fs::write(&path, "[not, a, document").unwrap();
    assert!(matches!(
        load_schema(&path),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_schema(dir.path().join("absent.json")),
        Err(LoadError::IoError(_))
    ));
}

#[test]
fn invalid_default_surfaces_as_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"name": "t", "args": [{"name": "n", "kind": "int", "default": "many"}]}"#,
    )
    .unwrap();
    let err = load_schema(&path).unwrap_err();
    assert!(matches!(err, LoadError::Schema(_)));
    assert!(err.to_string().starts_with("invalid schema:"));
}
