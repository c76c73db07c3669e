//! Term data loading
//!
//! Term data is a flat JSON object mapping each term to its definition.
//! Entries are returned in file order so that ties between equally close
//! keys are broken the same way on every run.

use crate::error::{DefineError, DefineResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File looked up in the working directory when no path is configured
pub const DEFAULT_DATA_FILE: &str = "econ_terms_data.json";

const BUNDLED_TERMS: &str = include_str!("../data/econ_terms_data.json");

/// Parse a JSON object of term -> definition pairs
///
/// Entries whose definition is not a string are skipped with a warning.
pub fn parse_terms(json: &str) -> DefineResult<Vec<(String, String)>> {
    let value: Value = serde_json::from_str(json)?;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(DefineError::TermData(format!(
                "expected a JSON object of terms, found {}",
                kind(&other)
            )))
        }
    };

    let mut terms = Vec::with_capacity(object.len());
    for (term, definition) in object {
        match definition {
            Value::String(definition) => terms.push((term, definition)),
            other => warn!(
                "⚠️ Skipping term '{}': definition is {}, not a string",
                term,
                kind(&other)
            ),
        }
    }
    Ok(terms)
}

/// Load term data from a file
pub fn load_terms(path: &Path) -> DefineResult<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    let terms = parse_terms(&content)?;
    info!("📚 Loaded {} terms from {}", terms.len(), path.display());
    Ok(terms)
}

/// The glossary compiled into the binary
pub fn bundled_terms() -> DefineResult<Vec<(String, String)>> {
    let terms = parse_terms(BUNDLED_TERMS)?;
    info!("📚 Using bundled glossary ({} terms)", terms.len());
    Ok(terms)
}

/// Load terms from `path` if given, else from `econ_terms_data.json` in the
/// working directory, else from the bundled glossary
pub fn resolve_terms(path: Option<&Path>) -> DefineResult<Vec<(String, String)>> {
    if let Some(path) = path {
        return load_terms(path);
    }

    let local = PathBuf::from(DEFAULT_DATA_FILE);
    if local.exists() {
        return load_terms(&local);
    }

    debug!("No {} in working directory", DEFAULT_DATA_FILE);
    bundled_terms()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
