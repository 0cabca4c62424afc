//! Error taxonomy for the reconnaissance pipeline.
//!
//! Fatal errors are scoped to the smallest unit that can fail: one file for
//! adapter translation, one analyzer phase for precision errors. A
//! multi-file run therefore always produces a best-effort partial report.

use std::path::PathBuf;

/// Reconnaissance pipeline error.
#[derive(Debug)]
pub enum ReconError {
    /// Raw tree missing a required structural field. Aborts that file's
    /// adapter translation only.
    MalformedTree {
        /// File whose tree could not be translated.
        file: PathBuf,
        /// What was missing or malformed.
        detail: String,
    },
    /// Sink analysis was requested against coarse adapter output that
    /// carries no exact byte offsets. Aborts the sink phase only.
    PrecisionUnavailable,
    /// Spawning or parsing an external backend process failed.
    BackendInvocation(String),
    /// IO error.
    Io(std::io::Error),
}

impl std::fmt::Display for ReconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTree { file, detail } => {
                write!(f, "malformed tree in {}: {detail}", file.display())
            }
            Self::PrecisionUnavailable => write!(
                f,
                "sink analysis requires exact byte offsets; the coarse backend reports line-level locations only"
            ),
            Self::BackendInvocation(msg) => write!(f, "backend invocation failed: {msg}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<std::io::Error> for ReconError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
