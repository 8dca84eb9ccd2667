use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// File selector: which directory entries belong to the sample
// ---------------------------------------------------------------------------

/// Return the files in `dir` whose name ends in `.<ext>`.
///
/// A match needs at least one character before the dot, so a bare `.txt`
/// (hidden-file style) is not selected for extension `txt`. Subdirectories
/// are never entered and directory entries whose own name happens to match
/// are skipped. An empty result is valid and handled downstream.
pub fn select_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{ext}");
    let mut selected = Vec::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("listing directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.context("reading directory entry")?;
        if !entry.file_type().context("reading entry type")?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            // Non-UTF-8 names cannot match a UTF-8 suffix.
            continue;
        };
        if name.len() > suffix.len() && name.ends_with(&suffix) {
            selected.push(entry.path());
        }
    }

    Ok(selected)
}
