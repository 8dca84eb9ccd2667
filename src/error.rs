use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Fatal error taxonomy
// ---------------------------------------------------------------------------

/// The failure modes with a defined message and exit status.
///
/// Anything escaping this taxonomy is treated as a bug: `main` dumps the
/// full error chain and a backtrace into an auto-numbered crash log.
#[derive(Debug, Error)]
pub enum AppError {
    /// The requested plot backend is not compiled into this binary.
    #[error("unsupported plot backend '{0}' (available: bitmap)")]
    UnsupportedBackend(String),

    /// The selector/loader produced an empty sample set.
    #[error("no files found with extension .{0}")]
    NoSamples(String),

    /// The rendered figure could not be encoded to the output path.
    #[error("could not save plot to {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AppError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::NoSamples(_) => 64,
            _ => 1,
        }
    }
}
