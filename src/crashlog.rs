use std::backtrace::Backtrace;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Crash log for errors outside the known taxonomy
// ---------------------------------------------------------------------------

/// First unused `fp<N>.log` path in `dir`, counting up from zero.
fn next_log_path(dir: &Path) -> PathBuf {
    let mut index = 0u32;
    loop {
        let candidate = dir.join(format!("fp{index}.log"));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// Persist an unhandled error chain plus a captured backtrace into the next
/// free crash log in `dir`. Returns the path written.
pub fn dump(dir: &Path, err: &anyhow::Error) -> Result<PathBuf> {
    let path = next_log_path(dir);
    let mut file = fs::File::create(&path)
        .with_context(|| format!("creating crash log {}", path.display()))?;
    writeln!(file, "{err:?}").context("writing crash log")?;
    writeln!(file, "{}", Backtrace::force_capture()).context("writing crash log")?;
    Ok(path)
}
