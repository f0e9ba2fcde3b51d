//! Rendering documents as block-style YAML and writing them to disk.
//!
//! Keys are emitted in insertion order; nothing is re-sorted. Non-ASCII text
//! is written as-is and long scalars are not folded. Strings a YAML 1.1
//! loader would read as booleans, nulls, numbers or dates are quoted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use dhf_model::ValidationDocument;

use crate::emitter;
use crate::error::{OutputError, Result};

/// Render a document as YAML text. An empty document renders as `{}`.
pub fn to_yaml_string<E: Serialize>(document: &ValidationDocument<E>) -> Result<String> {
    let value = serde_yaml::to_value(document)?;
    emitter::emit(&value)
}

/// Write `document` to `dir/file_name`, replacing any existing file.
///
/// `dir` must already exist.
pub fn write_document<E: Serialize>(
    dir: &Path,
    file_name: &str,
    document: &ValidationDocument<E>,
) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let yaml = to_yaml_string(document)?;
    fs::write(&path, yaml.as_bytes()).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = yaml.len(), "wrote document");
    Ok(path)
}
