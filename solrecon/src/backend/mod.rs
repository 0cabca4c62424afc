//! Backend adapters and invocation.
//!
//! Two upstream engines can supply tree data:
//! - `solc` standard-json AST output, with exact byte offsets ([`solc`]);
//! - the fallback indexer process, with line-level offsets only
//!   ([`fallback`]).
//!
//! Both adapters produce the same canonical [`crate::model::SourceUnit`]
//! sequence; downstream code never branches on which engine ran.
//! [`invoke`] owns the external process plumbing.

pub mod fallback;
pub mod invoke;
pub mod solc;

use crate::errors::ReconError;
use crate::model::SourceUnit;
use std::path::PathBuf;

/// Result of translating a batch of files: the units that translated
/// cleanly plus per-file failures. A malformed tree aborts only its own
/// file; remaining files still produce output.
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    /// Canonical units in the order the files were supplied.
    pub units: Vec<SourceUnit>,
    /// Files whose raw tree was structurally malformed.
    pub failures: Vec<(PathBuf, ReconError)>,
}

/// Converts a byte offset into a 1-based line number.
pub(crate) fn offset_to_line(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    let newlines = text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count();
    u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::offset_to_line;

    #[test]
    fn offset_to_line_is_one_based() {
        let text = "a\nb\nc";
        assert_eq!(offset_to_line(text, 0), 1);
        assert_eq!(offset_to_line(text, 2), 2);
        assert_eq!(offset_to_line(text, 4), 3);
        // Past-the-end offsets clamp to the last line.
        assert_eq!(offset_to_line(text, 100), 3);
    }
}
