//! Source file collection.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Collect every file under `root` whose name ends with `suffix`.
///
/// Paths are sorted component-wise so page and index output is deterministic.
pub fn collect_files(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if has_suffix(root, suffix) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }
    if !root.is_dir() {
        bail!("source root not found: {}", root.display());
    }

    let pattern = format!(
        "{}/**/*",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid source root: {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file() && has_suffix(p, suffix))
        .collect();
    files.sort();
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}
