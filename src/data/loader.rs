use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

// ---------------------------------------------------------------------------
// Value loader: one float per file
// ---------------------------------------------------------------------------

/// Read every selected file and parse its whole content as a single `f64`.
///
/// Lines are joined with a single space before trimming, so a file holding
/// anything besides one lone number ("1\n2\n", "abc") fails the parse and is
/// skipped with a warning. "NaN" and "inf" parse but make no usable sample,
/// so non-finite values are skipped the same way; downstream statistics and
/// charts only ever see finite values. Skips are never fatal; an unreadable
/// file is, since that points at something other than bad sample content.
pub fn load_samples(files: &[PathBuf]) -> Result<Vec<f64>> {
    let mut samples = Vec::with_capacity(files.len());

    for path in files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let content = text.lines().collect::<Vec<_>>().join(" ");
        match content.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                info!("read {value} from {}", path.display());
                samples.push(value);
            }
            Ok(value) => {
                warn!("skipped {}: {value} is not a finite sample", path.display());
            }
            Err(_) => {
                warn!(
                    "skipped {}: contents are not a parsable number",
                    path.display()
                );
            }
        }
    }

    Ok(samples)
}
