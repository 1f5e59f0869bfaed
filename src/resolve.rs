//! Destination resolution

use crate::types::StageError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name the source is staged under.
///
/// Paths without a final component (`.`, `..`, `dir/..`) are canonicalised
/// first so they still yield a name. The filesystem root has none.
pub fn source_name(source: &Path) -> Result<OsString, StageError> {
    if let Some(name) = source.file_name() {
        return Ok(name.to_os_string());
    }

    let canonical = fs::canonicalize(source)?;
    canonical
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| StageError::InvalidSource(source.to_path_buf()))
}

/// Create `destination_folder` (with ancestors) and return the absolute
/// path the source will be copied to.
pub fn resolve(source: &Path, destination_folder: &Path) -> Result<PathBuf, StageError> {
    let name = source_name(source)?;

    fs::create_dir_all(destination_folder)?;
    let folder = fs::canonicalize(destination_folder)?;

    Ok(folder.join(name))
}
