use crate::error::{PatchError, Result};
use crate::ipynb::NOTEBOOK_EXTENSION;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Notebooks that are excluded from CI test preparation
pub const EXCLUDED_NOTEBOOKS: &[&str] = &["data-preparation-ct-scan.ipynb"];

/// Filename prefix marking an already-generated test copy
pub const TEST_PREFIX: &str = "test_";

/// Whether a filename identifies a notebook eligible for patching
///
/// Already-generated `test_` copies and explicitly excluded notebooks are
/// never candidates, so repeated runs stay idempotent.
pub fn is_candidate(file_name: &str) -> bool {
    !file_name.starts_with(TEST_PREFIX) && !EXCLUDED_NOTEBOOKS.contains(&file_name)
}

/// Recursively discover candidate notebooks under `root`
///
/// Paths are returned in filesystem traversal order; no cross-file ordering
/// is guaranteed or required.
///
/// # Errors
///
/// Returns [`PatchError::InvalidDirectory`] if `root` does not exist or is
/// not a directory, before any traversal happens.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(PatchError::InvalidDirectory(root.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| PatchError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(NOTEBOOK_EXTENSION) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_candidate(name) {
            candidates.push(path.to_path_buf());
        }
    }

    Ok(candidates)
}
