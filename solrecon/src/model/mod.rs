//! Canonical AST model.
//!
//! Both backend adapters translate their native tree shapes into the types
//! in this module, so the analyzers never know (or branch on) which engine
//! produced the data. The only observable difference between the two
//! backends is whether `FunctionUnit::source_span` is populated.
//!
//! Every entity here is created once during adapter translation and is
//! immutable afterwards; analyzer output lives in separate record sets
//! keyed by [`EntityId`].

mod tree;
mod units;

pub use tree::{
    walk_requires, walk_statements, CallKind, CompareOp, ExpressionUnit, Span, StatementUnit,
};
pub use units::{
    ContractKind, ContractUnit, EntityId, FunctionUnit, ModifierUnit, Mutability, SourceUnit,
    Visibility,
};

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Original source text per file, supplied alongside the canonical model.
///
/// The sink analyzer slices matched expressions out of this; the model
/// itself never stores source text.
#[derive(Debug, Default, Clone)]
pub struct SourceTexts {
    texts: FxHashMap<PathBuf, String>,
}

impl SourceTexts {
    /// Creates an empty text map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the source text for a file.
    pub fn insert(&mut self, file: PathBuf, text: String) {
        self.texts.insert(file, text);
    }

    /// Returns the full text of a file, if known.
    #[must_use]
    pub fn get(&self, file: &Path) -> Option<&str> {
        self.texts.get(file).map(String::as_str)
    }

    /// Slices `span` out of a file's text. Returns `None` when the file is
    /// unknown or the span falls outside the text.
    #[must_use]
    pub fn slice(&self, file: &Path, span: Span) -> Option<&str> {
        let text = self.texts.get(file)?;
        text.get(span.start..span.end)
    }
}
