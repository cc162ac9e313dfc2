//! JSON output of target groups.

use crate::error::{OutputError, OutputResult};
use crate::output::TargetGroup;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Render groups as a JSON array indented with two spaces.
pub fn to_json(groups: &[TargetGroup]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}

/// Write the document to `path` and echo it to `out`.
///
/// The file is created or truncated. Returns the rendered document.
pub fn write_groups(
    groups: &[TargetGroup],
    path: &Path,
    mut out: impl Write,
) -> OutputResult<String> {
    let json = to_json(groups)?;

    fs::write(path, format!("{}\n", json)).map_err(|e| OutputError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    writeln!(out, "{}", json).map_err(OutputError::Stdout)?;
    out.flush().map_err(OutputError::Stdout)?;

    Ok(json)
}
