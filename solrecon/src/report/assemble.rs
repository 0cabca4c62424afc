//! Document tree assembly.
//!
//! Grouping is positional, never sorted: files in supplied order, contracts
//! in declaration order, functions in declaration order. That makes the
//! rendered report reproducible and diffable across runs and across the two
//! backends.

use crate::analyzers::{EntrypointRecord, SinkRecord};
use crate::classify::ClassifiedUnit;
use crate::model::{EntityId, Span};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Table-of-contents entry.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    /// Display title (`Contract.signature`).
    pub title: String,
    /// Stable anchor identifier.
    pub anchor: String,
}

/// One sink match under a function entry.
#[derive(Debug, Clone, Serialize)]
pub struct SinkEntry {
    /// Tag names in canonical order.
    pub tags: Vec<&'static str>,
    /// Byte span of the matched expression.
    pub span: Span,
    /// Source slice of the matched expression.
    pub snippet: String,
}

/// One function entry.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionEntry {
    /// Function signature.
    pub signature: String,
    /// Stable anchor identifier.
    pub anchor: String,
    /// Visibility display name.
    pub visibility: &'static str,
    /// Mutability display name.
    pub mutability: &'static str,
    /// 1-based declaration line.
    pub line: u32,
    /// Applied modifier names.
    pub modifiers: Vec<String>,
    /// Entrypoint tag names in canonical order; empty when the function
    /// appears only because of sink matches.
    pub tags: Vec<&'static str>,
    /// Sink matches in source order.
    pub sinks: Vec<SinkEntry>,
}

/// One contract section.
#[derive(Debug, Clone, Serialize)]
pub struct ContractSection {
    /// Contract name.
    pub name: String,
    /// Kind display name.
    pub kind: &'static str,
    /// Function entries in declaration order.
    pub functions: Vec<FunctionEntry>,
}

/// One file section.
#[derive(Debug, Clone, Serialize)]
pub struct FileSection {
    /// File path as supplied.
    pub path: String,
    /// Contract sections in declaration order.
    pub contracts: Vec<ContractSection>,
}

/// The assembled, format-agnostic document tree.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTree {
    /// Table of contents in document order.
    pub toc: Vec<TocEntry>,
    /// File sections in supplied order.
    pub files: Vec<FileSection>,
    /// User-facing note when the sink phase was skipped
    /// (`PrecisionUnavailable`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink_note: Option<String>,
    /// Soft warnings (unresolved modifiers, per-file adapter failures).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Derives the stable anchor for a function: contract name and signature,
/// lower-cased, every non-alphanumeric rune replaced with `-`.
#[must_use]
pub fn anchor_id(contract: &str, signature: &str) -> String {
    format!("{contract}-{signature}")
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Merges analyzer output into the document tree.
///
/// Functions appear when they carry an entrypoint record, a sink match, or
/// both; everything else is left out of the report.
#[must_use]
pub fn assemble(
    classified: &[ClassifiedUnit<'_>],
    entrypoints: &[EntrypointRecord],
    sinks: &[SinkRecord],
    sink_note: Option<String>,
    warnings: Vec<String>,
) -> ReportTree {
    let entry_by_id: FxHashMap<&EntityId, &EntrypointRecord> =
        entrypoints.iter().map(|r| (&r.id, r)).collect();
    let mut sinks_by_id: FxHashMap<&EntityId, Vec<&SinkRecord>> = FxHashMap::default();
    for sink in sinks {
        sinks_by_id.entry(&sink.id).or_default().push(sink);
    }

    let mut toc = Vec::new();
    let mut files = Vec::new();

    for entry in classified {
        let mut contracts = Vec::new();
        for contract in &entry.contracts {
            let mut functions = Vec::new();
            for func in &contract.functions {
                let id = contract.entity_id(func);
                let record = entry_by_id.get(&id);
                let func_sinks = sinks_by_id.get(&id);
                if record.is_none() && func_sinks.is_none() {
                    continue;
                }

                let anchor = anchor_id(&contract.name, &func.signature);
                toc.push(TocEntry {
                    title: format!("{}.{}", contract.name, func.signature),
                    anchor: anchor.clone(),
                });

                functions.push(FunctionEntry {
                    signature: func.signature.clone(),
                    anchor,
                    visibility: func.visibility.as_str(),
                    mutability: func.mutability.as_str(),
                    line: func.source_line,
                    modifiers: func.applied_modifiers.clone(),
                    tags: record
                        .map(|r| r.tags.iter().map(|t| t.as_str()).collect())
                        .unwrap_or_default(),
                    sinks: func_sinks
                        .map(|matches| {
                            matches
                                .iter()
                                .map(|s| SinkEntry {
                                    tags: s.tags.iter().map(|t| t.as_str()).collect(),
                                    span: s.span,
                                    snippet: s.snippet.clone(),
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            }
            if !functions.is_empty() {
                contracts.push(ContractSection {
                    name: contract.name.clone(),
                    kind: contract.kind.as_str(),
                    functions,
                });
            }
        }
        if !contracts.is_empty() {
            files.push(FileSection {
                path: entry.unit.path.to_string_lossy().into_owned(),
                contracts,
            });
        }
    }

    ReportTree {
        toc,
        files,
        sink_note,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::anchor_id;

    #[test]
    fn anchors_are_lowercase_with_dashes() {
        assert_eq!(
            anchor_id("Vault", "withdraw(uint256)"),
            "vault-withdraw-uint256-"
        );
        assert_eq!(anchor_id("Token", "receive()"), "token-receive--");
    }

    #[test]
    fn anchors_are_deterministic() {
        assert_eq!(
            anchor_id("A", "f(address, uint256)"),
            anchor_id("A", "f(address, uint256)")
        );
    }
}
