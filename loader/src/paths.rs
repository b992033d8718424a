//! Schema path collection for batch commands.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::document::{DocumentFormat, SchemaDocument};
use crate::error::{LoadError, Result};

/// Expands files and directories into a sorted, de-duplicated list of schema
/// documents.
///
/// Directories contribute their direct `.json`, `.yml` and `.yaml` entries.
/// Files are taken as given but must carry one of those extensions.
///
/// # Errors
///
/// Returns [`LoadError::InvalidInput`] for an empty input list, a missing
/// path, or a file with an unrecognized extension.
pub fn collect_schema_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if inputs.is_empty() {
        return Err(LoadError::InvalidInput(
            "no schema paths were provided".to_string(),
        ));
    }

    let mut paths = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && DocumentFormat::from_path(&path).is_some() {
                    paths.insert(path);
                }
            }
            continue;
        }

        if input.is_file() {
            if DocumentFormat::from_path(input).is_none() {
                return Err(LoadError::InvalidInput(format!(
                    "schema file '{}' must end in .json, .yml or .yaml",
                    input.display()
                )));
            }
            paths.insert(input.clone());
            continue;
        }

        return Err(LoadError::InvalidInput(format!(
            "schema path '{}' does not exist",
            input.display()
        )));
    }

    debug!(count = paths.len(), "collected schema paths");
    Ok(paths.into_iter().collect())
}

/// Outcome of loading one document in a batch.
#[derive(Debug)]
pub struct LoadReport {
    pub path: PathBuf,
    pub result: Result<SchemaDocument>,
}

/// Loads and validates every collected document, continuing past failures.
///
/// Each document is validated through [`SchemaDocument::into_schema`]; the
/// report keeps the document itself so callers can inspect it afterwards.
///
/// # Errors
///
/// Only path collection errors abort the batch.
pub fn load_all(inputs: &[PathBuf]) -> Result<Vec<LoadReport>> {
    let paths = collect_schema_paths(inputs)?;
    let reports = paths
        .into_iter()
        .map(|path| {
            let result = SchemaDocument::load(&path).and_then(|doc| {
                doc.clone().into_schema()?;
                Ok(doc)
            });
            if let Err(err) = &result {
                warn!(path = %path.display(), error = %err, "schema rejected");
            }
            LoadReport { path, result }
        })
        .collect();
    Ok(reports)
}
